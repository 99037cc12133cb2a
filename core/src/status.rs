use std::fmt;

use alloy_primitives::U256;

/// Number of status codes the DAO defines.
pub const USER_STATUS_COUNT: u8 = 3;

/// Whether an account can currently move its bonded and staged funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum UserStatus {
    Frozen = 0,
    Fluid = 1,
    Locked = 2,
}

/// The contract returns its status as a full ABI word, so the offending
/// code is kept at that width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    StatusOutOfRange { code: U256 },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StatusOutOfRange { code } => {
                write!(
                    f,
                    "status code {code} is out of range: expected 0..{}",
                    USER_STATUS_COUNT
                )
            }
        }
    }
}

impl std::error::Error for DecodeError {}

impl UserStatus {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Frozen => "FROZEN",
            Self::Fluid => "FLUID",
            Self::Locked => "LOCKED",
        }
    }
}

impl TryFrom<U256> for UserStatus {
    type Error = DecodeError;

    fn try_from(code: U256) -> Result<Self, Self::Error> {
        let out_of_range = DecodeError::StatusOutOfRange { code };
        match u8::try_from(code).map_err(|_| out_of_range)? {
            0 => Ok(Self::Frozen),
            1 => Ok(Self::Fluid),
            2 => Ok(Self::Locked),
            _ => Err(out_of_range),
        }
    }
}

impl TryFrom<u8> for UserStatus {
    type Error = DecodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::try_from(U256::from(code))
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_decode_in_table_order() {
        assert_eq!(UserStatus::try_from(0_u8), Ok(UserStatus::Frozen));
        assert_eq!(UserStatus::try_from(1_u8), Ok(UserStatus::Fluid));
        assert_eq!(UserStatus::try_from(2_u8), Ok(UserStatus::Locked));
    }

    #[test]
    fn out_of_range_code_is_rejected() {
        for code in [3_u8, 5, u8::MAX] {
            assert_eq!(
                UserStatus::try_from(code),
                Err(DecodeError::StatusOutOfRange {
                    code: U256::from(code)
                })
            );
        }
    }

    #[test]
    fn wide_words_are_not_truncated() {
        // 256 and 258 share their low byte with FROZEN and LOCKED.
        for word in [U256::from(256u64), U256::from(258u64), U256::MAX] {
            assert_eq!(
                UserStatus::try_from(word),
                Err(DecodeError::StatusOutOfRange { code: word })
            );
        }
        assert_eq!(UserStatus::try_from(U256::from(2u64)), Ok(UserStatus::Locked));
    }

    #[test]
    fn code_round_trips_through_decode() {
        for status in [UserStatus::Frozen, UserStatus::Fluid, UserStatus::Locked] {
            assert_eq!(UserStatus::try_from(status.code()), Ok(status));
        }
    }

    #[test]
    fn decode_error_display() {
        let err = DecodeError::StatusOutOfRange {
            code: U256::from(5u64),
        };
        assert_eq!(err.to_string(), "status code 5 is out of range: expected 0..3");

        let err = DecodeError::StatusOutOfRange {
            code: U256::from(256u64),
        };
        assert_eq!(err.to_string(), "status code 256 is out of range: expected 0..3");
    }

    #[test]
    fn status_names_match_contract_labels() {
        assert_eq!(UserStatus::Frozen.to_string(), "FROZEN");
        assert_eq!(UserStatus::Fluid.to_string(), "FLUID");
        assert_eq!(UserStatus::Locked.to_string(), "LOCKED");
    }
}
