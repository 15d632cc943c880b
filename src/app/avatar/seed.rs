use std::fmt::{Display, Formatter};

/// Input that identifies one avatar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Seed {
    Text(String),
    Number(i32),
}

impl Seed {
    /// Starting state of the stream for this seed.
    pub fn initial_state(&self) -> u32 {
        match self {
            Seed::Text(text) => hash_seed(text) as u32,
            Seed::Number(n) => *n as u32,
        }
    }
}

/// Rolling `acc * 31 + c` hash over UTF-16 code units, wrapping at 32 bits.
pub fn hash_seed(text: &str) -> i32 {
    text.encode_utf16().fold(0i32, |acc, unit| {
        i32::from(unit).wrapping_add((acc << 5).wrapping_sub(acc))
    })
}

impl Display for Seed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Seed::Text(text) => write!(f, "{}", text),
            Seed::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Seed {
    fn from(text: &str) -> Self {
        Seed::Text(text.to_owned())
    }
}

impl From<String> for Seed {
    fn from(text: String) -> Self {
        Seed::Text(text)
    }
}

impl From<i32> for Seed {
    fn from(n: i32) -> Self {
        Seed::Number(n)
    }
}
