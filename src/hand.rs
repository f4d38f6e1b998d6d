//! Reading a run value off a detected hand.
//!
//! The detector hands us 21 landmarks in normalized image coordinates, where
//! `y` grows downward. A digit is "up" when its tip sits higher (smaller `y`)
//! than the joint below it.
//!
//! # Weights
//!
//! * Thumb: 6, but only when it is the topmost digit (above its own joint and
//!   the index, middle and ring tips).
//! * Index, middle, ring, pinky: 1 each.
//!
//! The sum is clamped to `1..=6`, so a closed fist still plays a 1.
use std::str::FromStr;

pub const LANDMARK_COUNT: usize = 21;

const THUMB_TIP: usize = 4;
const THUMB_JOINT: usize = 3;
/// (tip, lower joint) landmark indices of index, middle, ring and pinky.
const FINGERS: [(usize, usize); 4] = [(8, 6), (12, 10), (16, 14), (20, 18)];
/// Tips the thumb must rise above to count.
const THUMB_RIVALS: [usize; 3] = [8, 12, 16];
const THUMB_WEIGHT: u8 = 6;

#[derive(Clone, PartialEq, Debug)]
pub enum PoseError {
    LandmarkCount(usize),
    UnknownHandedness(String),
}
impl std::fmt::Display for PoseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoseError::LandmarkCount(count) => {
                write!(f, "Expected {LANDMARK_COUNT} hand landmarks, got {count}")
            }
            PoseError::UnknownHandedness(label) => write!(f, "The handedness {label} is invalid"),
        }
    }
}
impl std::error::Error for PoseError {}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}
impl From<[f32; 3]> for Landmark {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

/// A full hand skeleton, always exactly [`LANDMARK_COUNT`] points.
#[derive(Clone, PartialEq, Debug)]
pub struct HandPose([Landmark; LANDMARK_COUNT]);
impl HandPose {
    pub fn from_landmarks(points: &[Landmark]) -> Result<Self, PoseError> {
        let landmarks = points
            .try_into()
            .map_err(|_| PoseError::LandmarkCount(points.len()))?;
        Ok(Self(landmarks))
    }
    fn y(&self, index: usize) -> f32 {
        self.0[index].y
    }
    fn thumb_up(&self) -> bool {
        let thumb = self.y(THUMB_TIP);
        thumb < self.y(THUMB_JOINT) && THUMB_RIVALS.iter().all(|tip| thumb < self.y(*tip))
    }
    fn fingers_up(&self) -> u8 {
        FINGERS.iter().filter(|(tip, joint)| self.y(*tip) < self.y(*joint)).count() as u8
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Handedness {
    Left,
    Right,
}
impl FromStr for Handedness {
    type Err = PoseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Left" => Ok(Handedness::Left),
            "Right" => Ok(Handedness::Right),
            _ => Err(PoseError::UnknownHandedness(s.to_owned())),
        }
    }
}

/// One hand as reported by the detector for a frame.
#[derive(Clone, PartialEq, Debug)]
pub struct Detection {
    pub pose: HandPose,
    pub handedness: Handedness,
}
impl Detection {
    /// Validate raw detector output.
    pub fn from_raw(points: &[[f32; 3]], handedness: &str) -> Result<Self, PoseError> {
        let landmarks: Vec<Landmark> = points.iter().copied().map(Landmark::from).collect();
        Ok(Self {
            pose: HandPose::from_landmarks(&landmarks)?,
            handedness: handedness.parse()?,
        })
    }
    pub fn runs(&self) -> u8 {
        runs_shown(&self.pose, self.handedness)
    }
}

/// Landmarks of a stylised hand showing `runs`.
///
/// `0` is a closed fist, `1..=4` raise fingers from the index outward and `6`
/// raises only the thumb. A five cannot be shown with these weights, it comes
/// out as four fingers.
pub fn synthetic_landmarks(runs: u8) -> [[f32; 3]; LANDMARK_COUNT] {
    const JOINT: f32 = 0.6;
    let mut points = [[0.5, JOINT, 0.0]; LANDMARK_COUNT];
    points[0][1] = 0.9;
    let thumb_up = runs >= THUMB_WEIGHT;
    let fingers = if thumb_up { 0 } else { runs.min(4) as usize };
    points[THUMB_TIP][1] = if thumb_up { 0.2 } else { 0.8 };
    for (i, (tip, _)) in FINGERS.iter().enumerate() {
        points[*tip][1] = if i < fingers { 0.4 } else { 0.8 };
    }
    points
}

/// Run value shown by `pose`, in `1..=6`.
///
/// `handedness` does not change the thumb test, so a left thumb is judged
/// like a right one.
pub fn runs_shown(pose: &HandPose, _handedness: Handedness) -> u8 {
    let thumb = if pose.thumb_up() { THUMB_WEIGHT } else { 0 };
    (thumb + pose.fingers_up()).clamp(1, 6)
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOINT_Y: f32 = 0.6;
    const UP_Y: f32 = 0.4;
    const DOWN_Y: f32 = 0.8;

    /// Every point at the joint height, digits listed in `up` raised.
    ///
    /// Digits: 0 thumb, 1 index, 2 middle, 3 ring, 4 pinky.
    fn pose(up: &[usize]) -> HandPose {
        let mut points = [Landmark { x: 0.5, y: JOINT_Y, z: 0.0 }; LANDMARK_COUNT];
        let tips = [THUMB_TIP, 8, 12, 16, 20];
        for (digit, tip) in tips.iter().enumerate() {
            points[*tip].y = if up.contains(&digit) { UP_Y } else { DOWN_Y };
        }
        HandPose::from_landmarks(&points).unwrap()
    }

    #[test]
    fn fist_plays_one() {
        assert_eq!(runs_shown(&pose(&[]), Handedness::Right), 1);
    }

    #[test]
    fn fingers_count_one_each() {
        assert_eq!(runs_shown(&pose(&[1]), Handedness::Right), 1);
        assert_eq!(runs_shown(&pose(&[1, 2]), Handedness::Right), 2);
        assert_eq!(runs_shown(&pose(&[1, 2, 3]), Handedness::Right), 3);
        assert_eq!(runs_shown(&pose(&[1, 2, 3, 4]), Handedness::Right), 4);
    }

    #[test]
    fn thumb_alone_plays_six() {
        assert_eq!(runs_shown(&pose(&[0]), Handedness::Right), 6);
    }

    #[test]
    fn all_digits_clamp_to_six() {
        let open = pose(&[0, 1, 2, 3, 4]);
        // Thumb tip level with the finger tips is not topmost.
        assert_eq!(runs_shown(&open, Handedness::Right), 4);

        let mut points = open.0;
        points[THUMB_TIP].y = UP_Y - 0.1;
        let open = HandPose::from_landmarks(&points).unwrap();
        assert_eq!(runs_shown(&open, Handedness::Right), 6);
    }

    #[test]
    fn thumb_below_a_finger_tip_does_not_count() {
        let mut points = pose(&[0, 2]).0;
        points[12].y = UP_Y - 0.1;
        let pose = HandPose::from_landmarks(&points).unwrap();
        assert_eq!(runs_shown(&pose, Handedness::Right), 1);
    }

    #[test]
    fn handedness_does_not_mirror() {
        let thumb = pose(&[0]);
        assert_eq!(runs_shown(&thumb, Handedness::Left), runs_shown(&thumb, Handedness::Right));
    }

    #[test]
    fn synthetic_hands_read_back() {
        for (shown, read) in [(0, 1), (1, 1), (2, 2), (3, 3), (4, 4), (5, 4), (6, 6)] {
            let detection = Detection::from_raw(&synthetic_landmarks(shown), "Right").unwrap();
            assert_eq!(detection.runs(), read, "showing {shown}");
        }
    }

    #[test]
    fn raw_detection_is_validated() {
        let points = [[0.5, 0.5, 0.0]; LANDMARK_COUNT];
        let detection = Detection::from_raw(&points, "Left").unwrap();
        assert_eq!(detection.handedness, Handedness::Left);
        assert_eq!(detection.runs(), 1);

        let short = Detection::from_raw(&points[..20], "Left");
        assert_eq!(short, Err(PoseError::LandmarkCount(20)));
        let unknown = Detection::from_raw(&points, "Both");
        assert_eq!(unknown, Err(PoseError::UnknownHandedness("Both".to_owned())));
    }
}
