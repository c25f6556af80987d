use std::fmt::Display;
use std::str::FromStr;

use num_bigint::BigInt;
use thiserror::Error;

use super::encoding::{SPLASH_PREFIX, SPLASH_VERSION};
use crate::spectrum::SpectrumType;
use crate::utils::{zero_pad, SUM_BLOCK_WIDTH};

/// The number of hexadecimal characters kept from the top ion digest
pub const TOP_IONS_HASH_LENGTH: usize = 10;

/// The number of hexadecimal characters kept from the full spectrum digest
pub const SPECTRUM_HASH_LENGTH: usize = 20;

const BLOCK_SEPARATOR: char = '-';

/// A SPLASH spectral hash identifier, split into its four blocks.
///
/// The [`Display`] implementation produces the canonical string form,
/// `<type+version>-<top ions>-<spectrum>-<weighted sum>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Splash {
    spectrum_type: SpectrumType,
    top_ions_hash: String,
    spectrum_hash: String,
    weighted_sum: BigInt,
}

impl Splash {
    pub(crate) fn new(
        spectrum_type: SpectrumType,
        top_ions_hash: String,
        spectrum_hash: String,
        weighted_sum: BigInt,
    ) -> Self {
        Self {
            spectrum_type,
            top_ions_hash,
            spectrum_hash,
            weighted_sum,
        }
    }

    pub fn spectrum_type(&self) -> SpectrumType {
        self.spectrum_type
    }

    pub fn version(&self) -> u8 {
        SPLASH_VERSION
    }

    pub fn top_ions_hash(&self) -> &str {
        &self.top_ions_hash
    }

    pub fn spectrum_hash(&self) -> &str {
        &self.spectrum_hash
    }

    /// The weighted ion sum, already divided by `10^12`
    pub fn weighted_sum(&self) -> &BigInt {
        &self.weighted_sum
    }

    pub fn type_block(&self) -> String {
        super::encoding::encode_type_block(self.spectrum_type)
    }

    pub fn sum_block(&self) -> String {
        zero_pad(&self.weighted_sum, SUM_BLOCK_WIDTH)
    }
}

impl Display for Splash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{BLOCK_SEPARATOR}{}{BLOCK_SEPARATOR}{}{BLOCK_SEPARATOR}{}",
            self.type_block(),
            self.top_ions_hash,
            self.spectrum_hash,
            self.sum_block()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplashParseError {
    #[error("Expected 4 blocks separated by '-', found {0}")]
    WrongBlockCount(usize),
    #[error("The first block {0:?} does not start with \"splash\"")]
    MissingPrefix(String),
    #[error("The first block {0:?} is not a type code followed by a version digit")]
    MalformedTypeBlock(String),
    #[error("Spectrum type code {0} is not recognized")]
    UnknownSpectrumType(String),
    #[error("SPLASH version {0} is not supported")]
    UnsupportedVersion(u8),
    #[error("Block {0:?} is not {1} lowercase hexadecimal characters")]
    MalformedHashBlock(String, usize),
    #[error("Block {0:?} is not a decimal number of at least 10 digits")]
    MalformedSumBlock(String),
}

fn is_hash_block(block: &str, length: usize) -> bool {
    block.len() == length
        && block
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Parses the canonical string form, rejecting anything [`Display`] would not produce.
///
/// The type block is read as a run of type code digits followed by the single
/// version digit.
impl FromStr for Splash {
    type Err = SplashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let blocks: Vec<&str> = s.trim().split(BLOCK_SEPARATOR).collect();
        if blocks.len() != 4 {
            return Err(SplashParseError::WrongBlockCount(blocks.len()));
        }

        let type_block = blocks[0];
        let codes = type_block
            .strip_prefix(SPLASH_PREFIX)
            .ok_or_else(|| SplashParseError::MissingPrefix(type_block.to_string()))?;
        if codes.len() < 2 || !codes.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SplashParseError::MalformedTypeBlock(type_block.to_string()));
        }
        let (type_code, version) = codes.split_at(codes.len() - 1);
        let version: u8 = version
            .parse()
            .map_err(|_| SplashParseError::MalformedTypeBlock(type_block.to_string()))?;
        if version != SPLASH_VERSION {
            return Err(SplashParseError::UnsupportedVersion(version));
        }
        let spectrum_type = type_code
            .parse::<u8>()
            .ok()
            .and_then(|code| SpectrumType::try_from(code).ok())
            .ok_or_else(|| SplashParseError::UnknownSpectrumType(type_code.to_string()))?;

        let top_ions_hash = blocks[1];
        if !is_hash_block(top_ions_hash, TOP_IONS_HASH_LENGTH) {
            return Err(SplashParseError::MalformedHashBlock(
                top_ions_hash.to_string(),
                TOP_IONS_HASH_LENGTH,
            ));
        }
        let spectrum_hash = blocks[2];
        if !is_hash_block(spectrum_hash, SPECTRUM_HASH_LENGTH) {
            return Err(SplashParseError::MalformedHashBlock(
                spectrum_hash.to_string(),
                SPECTRUM_HASH_LENGTH,
            ));
        }

        let sum_block = blocks[3];
        let overpadded = sum_block.len() > SUM_BLOCK_WIDTH && sum_block.starts_with('0');
        if sum_block.len() < SUM_BLOCK_WIDTH
            || overpadded
            || !sum_block.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(SplashParseError::MalformedSumBlock(sum_block.to_string()));
        }
        let weighted_sum = sum_block
            .parse::<BigInt>()
            .map_err(|_| SplashParseError::MalformedSumBlock(sum_block.to_string()))?;

        Ok(Self::new(
            spectrum_type,
            top_ions_hash.to_string(),
            spectrum_hash.to_string(),
            weighted_sum,
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const EXAMPLE: &str = "splash10-b4a699ba3f-a128435ac01cbfe72c60-0000013172";

    #[test]
    fn test_parse() {
        let splash: Splash = EXAMPLE.parse().unwrap();
        assert_eq!(splash.spectrum_type(), SpectrumType::MS);
        assert_eq!(splash.version(), 0);
        assert_eq!(splash.top_ions_hash(), "b4a699ba3f");
        assert_eq!(splash.spectrum_hash(), "a128435ac01cbfe72c60");
        assert_eq!(splash.weighted_sum(), &BigInt::from(13172));
        assert_eq!(splash.to_string(), EXAMPLE);
    }

    #[test]
    fn test_parse_wide_sum() {
        let text = "splash30-b4a699ba3f-a128435ac01cbfe72c60-123456789012";
        let splash: Splash = text.parse().unwrap();
        assert_eq!(splash.spectrum_type(), SpectrumType::UV);
        assert_eq!(splash.to_string(), text);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "splash10-b4a699ba3f".parse::<Splash>(),
            Err(SplashParseError::WrongBlockCount(2))
        );
        assert!(matches!(
            "spalsh10-b4a699ba3f-a128435ac01cbfe72c60-0000013172".parse::<Splash>(),
            Err(SplashParseError::MissingPrefix(_))
        ));
        assert_eq!(
            "splash11-b4a699ba3f-a128435ac01cbfe72c60-0000013172".parse::<Splash>(),
            Err(SplashParseError::UnsupportedVersion(1))
        );
        assert!(matches!(
            "splash90-b4a699ba3f-a128435ac01cbfe72c60-0000013172".parse::<Splash>(),
            Err(SplashParseError::UnknownSpectrumType(_))
        ));
        assert!(matches!(
            "splash10-B4A699BA3F-a128435ac01cbfe72c60-0000013172".parse::<Splash>(),
            Err(SplashParseError::MalformedHashBlock(_, TOP_IONS_HASH_LENGTH))
        ));
        assert!(matches!(
            "splash10-b4a699ba3f-a128435ac01cbfe72c6-0000013172".parse::<Splash>(),
            Err(SplashParseError::MalformedHashBlock(_, SPECTRUM_HASH_LENGTH))
        ));
        assert!(matches!(
            "splash10-b4a699ba3f-a128435ac01cbfe72c60-13172".parse::<Splash>(),
            Err(SplashParseError::MalformedSumBlock(_))
        ));
        assert!(matches!(
            "splash10-b4a699ba3f-a128435ac01cbfe72c60-000000013172".parse::<Splash>(),
            Err(SplashParseError::MalformedSumBlock(_))
        ));
    }
}
