//! ANSI escape sequence parser
//!
//! State machine that processes bytes and emits console events.
//! Only CSI sequences with decimal parameters are understood:
//!
//! ```text
//! ESC '[' (digits ';')* letter      letter in A B C D G H J K m
//! ```
//!
//! Anything else that starts with ESC is abandoned back to ground.

/// Maximum number of CSI parameters
pub const MAX_PARAMS: usize = 4;

/// Parser state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Normal text processing
    Ground,
    /// Received ESC
    Escape,
    /// Received ESC [, collecting parameters
    CsiParam,
}

/// Supported CSI commands, by final byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsiCommand {
    /// `A` - cursor up
    CursorUp,
    /// `B` - cursor down
    CursorDown,
    /// `C` - cursor forward (right)
    CursorForward,
    /// `D` - cursor back (left)
    CursorBack,
    /// `G` - cursor horizontal absolute
    CursorColumn,
    /// `H` - cursor position
    CursorPosition,
    /// `J` - erase in display
    EraseDisplay,
    /// `K` - erase in line
    EraseLine,
    /// `m` - select graphic rendition
    Sgr,
}

impl CsiCommand {
    /// Map a final byte to a command, `None` if unsupported
    pub const fn from_final(byte: u8) -> Option<Self> {
        match byte {
            b'A' => Some(Self::CursorUp),
            b'B' => Some(Self::CursorDown),
            b'C' => Some(Self::CursorForward),
            b'D' => Some(Self::CursorBack),
            b'G' => Some(Self::CursorColumn),
            b'H' => Some(Self::CursorPosition),
            b'J' => Some(Self::EraseDisplay),
            b'K' => Some(Self::EraseLine),
            b'm' => Some(Self::Sgr),
            _ => None,
        }
    }

    /// The final byte that selects this command
    pub const fn final_byte(self) -> u8 {
        match self {
            Self::CursorUp => b'A',
            Self::CursorDown => b'B',
            Self::CursorForward => b'C',
            Self::CursorBack => b'D',
            Self::CursorColumn => b'G',
            Self::CursorPosition => b'H',
            Self::EraseDisplay => b'J',
            Self::EraseLine => b'K',
            Self::Sgr => b'm',
        }
    }
}

/// CSI parameter list
///
/// Always holds at least one slot: an omitted parameter is an implicit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    values: [u32; MAX_PARAMS],
    len: usize,
}

impl Params {
    /// A list holding the single implicit 0
    pub const fn new() -> Self {
        Self {
            values: [0; MAX_PARAMS],
            len: 1,
        }
    }

    /// Build a list from explicit values (at most `MAX_PARAMS` are kept)
    pub fn from_slice(values: &[u32]) -> Self {
        let mut params = Self::new();
        let n = values.len().min(MAX_PARAMS);
        params.values[..n].copy_from_slice(&values[..n]);
        params.len = n.max(1);
        params
    }

    /// Parameter `index`, 0 if it was not supplied
    #[inline]
    pub fn get(&self, index: usize) -> u32 {
        if index < self.len {
            self.values[index]
        } else {
            0
        }
    }

    /// Number of slots in use
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no slot is in use (never true for a parsed list)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slots in use, in order
    pub fn iter(&self) -> core::slice::Iter<'_, u32> {
        self.values[..self.len].iter()
    }

    /// Accumulate a decimal digit into the current slot (wraps on overflow)
    fn push_digit(&mut self, digit: u8) {
        let slot = &mut self.values[self.len - 1];
        *slot = slot.wrapping_mul(10).wrapping_add(digit as u32);
    }

    /// Move to the next slot; once all slots are used the last one keeps accumulating
    fn next_slot(&mut self) {
        if self.len < MAX_PARAMS {
            self.len += 1;
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

/// A completed CSI sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Csi {
    pub command: CsiCommand,
    pub params: Params,
}

/// Events produced by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Draw a byte as a character cell
    Print(u8),
    /// Execute a control character (`\r`, `\n`, `\b`, `\t`)
    Execute(u8),
    /// Dispatch a CSI command
    Csi(Csi),
}

/// ANSI escape sequence parser
#[derive(Debug, Clone)]
pub struct Parser {
    state: State,
    params: Params,
}

impl Parser {
    /// Create a new parser
    pub const fn new() -> Self {
        Self {
            state: State::Ground,
            params: Params::new(),
        }
    }

    /// Reset parser to ground state
    pub fn reset(&mut self) {
        self.state = State::Ground;
        self.params = Params::new();
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Process a single byte, returning an event if one is produced
    ///
    /// `None` means the byte was swallowed by an escape sequence.
    pub fn advance(&mut self, byte: u8) -> Option<Event> {
        match self.state {
            State::Ground => self.ground(byte),
            State::Escape => self.escape(byte),
            State::CsiParam => self.csi_param(byte),
        }
    }

    fn ground(&mut self, byte: u8) -> Option<Event> {
        match byte {
            // ESC
            0x1B => {
                self.state = State::Escape;
                None
            }
            b'\r' | b'\n' | 0x08 | b'\t' => Some(Event::Execute(byte)),
            _ => Some(Event::Print(byte)),
        }
    }

    fn escape(&mut self, byte: u8) -> Option<Event> {
        if byte == b'[' {
            self.state = State::CsiParam;
            self.params = Params::new();
        } else {
            // Not a CSI; the byte is dropped, not reprocessed
            log::trace!("abandoning escape sequence at {:#04x}", byte);
            self.state = State::Ground;
        }
        None
    }

    fn csi_param(&mut self, byte: u8) -> Option<Event> {
        match byte {
            b'0'..=b'9' => {
                self.params.push_digit(byte - b'0');
                None
            }
            b';' => {
                self.params.next_slot();
                None
            }
            _ => {
                self.state = State::Ground;
                match CsiCommand::from_final(byte) {
                    Some(command) => Some(Event::Csi(Csi {
                        command,
                        params: self.params,
                    })),
                    None => {
                        log::trace!("dropping unsupported CSI final byte {:#04x}", byte);
                        None
                    }
                }
            }
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
