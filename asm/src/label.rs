use indexmap::IndexMap;

use crate::{
    config::Config,
    error::{AsmError, Error},
    parser::Line,
};

/// Label name -> (defining line, address), in definition order.
#[derive(Debug, Clone)]
pub struct Labels {
    case_sensitive: bool,
    labels: IndexMap<String, (usize, u8)>,
}

impl Labels {
    pub fn new(case_sensitive: bool) -> Self {
        Labels {
            case_sensitive,
            labels: IndexMap::new(),
        }
    }

    fn key(&self, name: &str) -> String {
        if self.case_sensitive {
            name.to_string()
        } else {
            name.to_ascii_lowercase()
        }
    }

    /// Returns the previous definition if the name was already taken; it is kept.
    pub fn insert(&mut self, name: &str, line_no: usize, addr: u8) -> Option<(usize, u8)> {
        let key = self.key(name);
        match self.labels.get(&key) {
            Some(prev) => Some(*prev),
            None => {
                self.labels.insert(key, (line_no, addr));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<u8> {
        self.labels.get(&self.key(name)).map(|(_, addr)| *addr)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.labels.iter().map(|(name, (_, addr))| (name.as_str(), *addr))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// First pass: give every word an address starting at `origin` and record labels.
///
/// A label on a line without an operation takes the address of the next word.
/// Stops at the first re-defined label.
pub fn collect(lines: &[Line], cfg: &Config) -> Result<(Labels, Vec<Line>), AsmError> {
    let mut labels = Labels::new(cfg.case_sensitive_labels);
    let mut pc: u16 = cfg.origin.into();
    let mut addressed = Vec::with_capacity(lines.len());

    for line in lines {
        let mut line = line.clone();

        if let Some(name) = &line.label {
            let addr = address(pc, line.line_no)?;
            if let Some((prev, _)) = labels.insert(name, line.line_no, addr) {
                return Err(AsmError::new(
                    line.line_no,
                    Error::DuplicateLabel(name.clone(), prev),
                ));
            }
        }

        if line.has_word() {
            line.addr = Some(address(pc, line.line_no)?);
            pc += 1;
        }
        addressed.push(line);
    }

    Ok((labels, addressed))
}

fn address(pc: u16, line_no: usize) -> Result<u8, AsmError> {
    u8::try_from(pc).map_err(|_| AsmError::new(line_no, Error::MemoryOverflow(pc)))
}
