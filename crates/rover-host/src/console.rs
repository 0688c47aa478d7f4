use rover_core::EventKind;

/// One line typed into the interactive demo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Empty,
    Quit,
    State,
    Help,
    /// `intensity N`, clamped later by the engine.
    Intensity(u8),
    /// `intensity` with a missing or non-numeric argument.
    IntensityUsage,
    /// An event, optionally forcing the intensity first (the `m`/`o` shortcuts).
    Event {
        event: EventKind,
        force_intensity: Option<u8>,
    },
}

impl ConsoleCommand {
    pub fn parse(input: &str) -> Self {
        let input = input.trim().to_ascii_uppercase();
        if input.is_empty() {
            return Self::Empty;
        }

        if let Some(rest) = input.strip_prefix("INTENSITY") {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            return match parts.as_slice() {
                [level] if level.bytes().all(|b| b.is_ascii_digit()) => {
                    let level = level.parse::<u64>().unwrap_or(u64::MAX);
                    Self::Intensity(u8::try_from(level).unwrap_or(u8::MAX))
                }
                _ => Self::IntensityUsage,
            };
        }

        let event = |name: &str, force: Option<u8>| Self::Event {
            event: EventKind::new(name),
            force_intensity: force,
        };
        match input.as_str() {
            "QUIT" | "EXIT" => Self::Quit,
            "STATE" => Self::State,
            "HELP" | "?" => Self::Help,
            "H" => event("SAW_HUMAN", None),
            "R" => event("RANDOM", None),
            "M" => event("COLLISION", Some(2)),
            "O" => event("STUCK", Some(2)),
            other => event(other, None),
        }
    }
}

pub const CONSOLE_HELP: &str = "\
Commands:
  [EVENT_NAME]      e.g. BOOT, COLLISION, RESET, MOVE_START, STUCK
  intensity [0-2]   Set base strictness level
  h                 Human detected (SAW_HUMAN)
  r                 Random line (RANDOM)
  m                 Malarkey (COLLISION at high intensity)
  o                 Overwhelmed (STUCK at high intensity)
  state             Show engine state
  quit              Exit";
