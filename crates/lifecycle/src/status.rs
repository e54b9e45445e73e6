/// Progress notifications an engine may send back to its host.
///
/// The numeric codes are part of the foreign callback contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum StatusCode {
    CanvasCreated = 0,
    FrameEntered = 1,
}

impl StatusCode {
    pub const fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(StatusCode::CanvasCreated),
            1 => Some(StatusCode::FrameEntered),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(StatusCode::CanvasCreated.code(), 0);
        assert_eq!(StatusCode::FrameEntered.code(), 1);
        assert_eq!(StatusCode::from_code(1), Some(StatusCode::FrameEntered));
        assert_eq!(StatusCode::from_code(7), None);
    }
}
