//! Dominant end-of-line sequence detection.
//!
//! Used by the configuration writer so that an appended `includeIf` stanza
//! keeps the line-ending convention of an existing global Git configuration
//! file instead of introducing a mixed one.

/// The four recognized end-of-line sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EolSequence {
    Lf,
    Cr,
    LfCr,
    CrLf,
}

impl EolSequence {
    /// The literal byte sequence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Cr => "\r",
            Self::LfCr => "\n\r",
            Self::CrLf => "\r\n",
        }
    }
}

impl std::fmt::Display for EolSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lf => write!(f, "LF"),
            Self::Cr => write!(f, "CR"),
            Self::LfCr => write!(f, "LFCR"),
            Self::CrLf => write!(f, "CRLF"),
        }
    }
}

/// Candidates in detection order. A later candidate with a count equal to
/// the running maximum wins, so e.g. pure CRLF content (where LF, CR, and
/// CRLF all count N) reports CRLF.
const CANDIDATES: [EolSequence; 4] = [
    EolSequence::Lf,
    EolSequence::Cr,
    EolSequence::LfCr,
    EolSequence::CrLf,
];

/// Detect the most frequently used end-of-line sequence in `content`.
///
/// Counts are taken per candidate with non-overlapping substring matching;
/// candidates are not mutually exclusive (each LF inside a CRLF also counts
/// toward LF). Empty content yields the default, [`EolSequence::Lf`].
pub fn detect(content: &str) -> EolSequence {
    if content.is_empty() {
        return EolSequence::Lf;
    }

    let mut max_count = 0;
    let mut preferred = EolSequence::Lf;

    for candidate in CANDIDATES {
        let count = content.matches(candidate.as_str()).count();
        if count >= max_count {
            max_count = count;
            preferred = candidate;
        }
    }

    preferred
}
