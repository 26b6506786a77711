//! Two-pass assembler for the Hex8 instruction set.
//!
//! ```
//! use hex8as::{assemble, hexfmt, Config};
//!
//! let cfg = Config::default();
//! let asm = assemble("start: ldac 5\n ldam 3\n br start\n", &cfg).unwrap();
//! assert_eq!(asm.words, vec![0x35, 0x03, 0x90]);
//! assert_eq!(hexfmt::format(&asm.words, &cfg), "35\n03\n90\n");
//! ```

pub mod config;
pub mod encode;
pub mod error;
pub mod hexfmt;
pub mod label;
pub mod parser;
pub mod util;

pub use config::{Config, HexCase};
pub use error::{AsmError, Error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    pub words: Vec<u8>,
}

impl Assembly {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn to_hex(&self, cfg: &Config) -> String {
        hexfmt::format(&self.words, cfg)
    }
}

/// Parse, collect labels, encode. No output is produced if any line fails.
pub fn assemble(src: &str, cfg: &Config) -> Result<Assembly, Vec<AsmError>> {
    let lines = parser::parse(src, cfg)?;
    let (labels, lines) = label::collect(&lines, cfg).map_err(|err| vec![err])?;
    let words = encode::encode(&lines, &labels)?;
    Ok(Assembly { words })
}
