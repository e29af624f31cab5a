//! Typed key→value store for layout-affecting options.
//!
//! One typed field per option rather than a runtime enum dispatch, plus
//! `serde`/`toml` (de)serialization so an embedding app can override
//! defaults from a config file.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WmError};

/// Axes affected by `equalalways`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EaDirection {
    Horizontal,
    Vertical,
    Both,
}

impl Default for EaDirection {
    fn default() -> Self {
        EaDirection::Both
    }
}

/// The value carried by a single option. One variant per declared option
/// type — `get`/`set` work in terms of this tagged value so callers can
/// handle options generically (e.g. a `:set` command parser) without a
/// separate accessor per option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionValue {
    Integer(i32),
    Boolean(bool),
    EaDir(EaDirection),
}

impl OptionValue {
    fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Integer(_) => "integer",
            OptionValue::Boolean(_) => "boolean",
            OptionValue::EaDir(_) => "eadirection",
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            OptionValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            OptionValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_ea_direction(&self) -> Option<EaDirection> {
        match self {
            OptionValue::EaDir(v) => Some(*v),
            _ => None,
        }
    }
}

/// The fixed set of option names, keyed by their long name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionName {
    CmdHeight,
    EaDirection,
    EqualAlways,
    SplitBelow,
    SplitRight,
    WinFixHeight,
    WinMinHeight,
    WinMinWidth,
    WinHeight,
    WinWidth,
}

impl OptionName {
    /// The short alias for this option, kept for a future `:set` parser.
    pub fn shorthand(&self) -> &'static str {
        match self {
            OptionName::CmdHeight => "ch",
            OptionName::EaDirection => "ead",
            OptionName::EqualAlways => "ea",
            OptionName::SplitBelow => "sb",
            OptionName::SplitRight => "spr",
            OptionName::WinFixHeight => "wfh",
            OptionName::WinMinHeight => "wmh",
            OptionName::WinMinWidth => "wmw",
            OptionName::WinHeight => "wh",
            OptionName::WinWidth => "wiw",
        }
    }

    /// The full option name, as used in TOML and by a `:set` parser.
    pub fn long_name(&self) -> &'static str {
        match self {
            OptionName::CmdHeight => "cmdheight",
            OptionName::EaDirection => "eadirection",
            OptionName::EqualAlways => "equalalways",
            OptionName::SplitBelow => "splitbelow",
            OptionName::SplitRight => "splitright",
            OptionName::WinFixHeight => "winfixheight",
            OptionName::WinMinHeight => "winminheight",
            OptionName::WinMinWidth => "winminwidth",
            OptionName::WinHeight => "winheight",
            OptionName::WinWidth => "winwidth",
        }
    }

    /// Resolve a long or short name (e.g. `"splitright"` or `"spr"`) to its
    /// `OptionName`. `None` if `name` matches neither form of any option.
    pub fn parse(name: &str) -> Option<Self> {
        const ALL: [OptionName; 10] = [
            OptionName::CmdHeight,
            OptionName::EaDirection,
            OptionName::EqualAlways,
            OptionName::SplitBelow,
            OptionName::SplitRight,
            OptionName::WinFixHeight,
            OptionName::WinMinHeight,
            OptionName::WinMinWidth,
            OptionName::WinHeight,
            OptionName::WinWidth,
        ];
        ALL.into_iter()
            .find(|opt| opt.long_name() == name || opt.shorthand() == name)
    }

    fn expected_type(&self) -> &'static str {
        match self {
            OptionName::EaDirection => "eadirection",
            OptionName::EqualAlways
            | OptionName::SplitBelow
            | OptionName::SplitRight
            | OptionName::WinFixHeight => "boolean",
            OptionName::CmdHeight
            | OptionName::WinMinHeight
            | OptionName::WinMinWidth
            | OptionName::WinHeight
            | OptionName::WinWidth => "integer",
        }
    }
}

/// The option store: one typed field per declared option. A tree owns exactly
/// one of these (see `DESIGN.md`'s Open Question decision on scope) rather
/// than it being a true process-wide global.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionStore {
    pub cmdheight: i32,
    pub eadirection: EaDirection,
    pub equalalways: bool,
    pub splitbelow: bool,
    pub splitright: bool,
    pub winfixheight: bool,
    pub winminheight: i32,
    pub winminwidth: i32,
    pub winheight: i32,
    pub winwidth: i32,
}

impl Default for OptionStore {
    fn default() -> Self {
        Self {
            cmdheight: 1,
            eadirection: EaDirection::Both,
            equalalways: true,
            splitbelow: false,
            splitright: false,
            winfixheight: false,
            winminheight: 1,
            winminwidth: 1,
            winheight: 0,
            winwidth: 0,
        }
    }
}

impl OptionStore {
    pub fn get(&self, name: OptionName) -> OptionValue {
        match name {
            OptionName::CmdHeight => OptionValue::Integer(self.cmdheight),
            OptionName::EaDirection => OptionValue::EaDir(self.eadirection),
            OptionName::EqualAlways => OptionValue::Boolean(self.equalalways),
            OptionName::SplitBelow => OptionValue::Boolean(self.splitbelow),
            OptionName::SplitRight => OptionValue::Boolean(self.splitright),
            OptionName::WinFixHeight => OptionValue::Boolean(self.winfixheight),
            OptionName::WinMinHeight => OptionValue::Integer(self.winminheight),
            OptionName::WinMinWidth => OptionValue::Integer(self.winminwidth),
            OptionName::WinHeight => OptionValue::Integer(self.winheight),
            OptionName::WinWidth => OptionValue::Integer(self.winwidth),
        }
    }

    /// Look up an option by its long or short string name (e.g. `:set`
    /// command input). Returns [`WmError::UnknownOption`] when `name`
    /// matches neither form of any declared option.
    pub fn get_by_name(&self, name: &str) -> Result<OptionValue> {
        OptionName::parse(name)
            .map(|n| self.get(n))
            .ok_or_else(|| WmError::UnknownOption(name.to_string()))
    }

    /// Set an option by its long or short string name. Returns
    /// [`WmError::UnknownOption`] when `name` matches no declared option, or
    /// [`WmError::OptionTypeMismatch`] when `value`'s type doesn't match.
    pub fn set_by_name(&mut self, name: &str, value: OptionValue) -> Result<()> {
        let option = OptionName::parse(name).ok_or_else(|| WmError::UnknownOption(name.to_string()))?;
        self.set(option, value)
    }

    /// Set `name` to `value`. Errors if `value`'s type doesn't match the
    /// option's declared type; no field is mutated on a type mismatch.
    pub fn set(&mut self, name: OptionName, value: OptionValue) -> Result<()> {
        let mismatch = || WmError::OptionTypeMismatch {
            name: name.shorthand(),
            expected: name.expected_type(),
        };

        match name {
            OptionName::CmdHeight => self.cmdheight = value.as_integer().ok_or_else(mismatch)?,
            OptionName::EaDirection => {
                self.eadirection = value.as_ea_direction().ok_or_else(mismatch)?
            }
            OptionName::EqualAlways => self.equalalways = value.as_boolean().ok_or_else(mismatch)?,
            OptionName::SplitBelow => self.splitbelow = value.as_boolean().ok_or_else(mismatch)?,
            OptionName::SplitRight => self.splitright = value.as_boolean().ok_or_else(mismatch)?,
            OptionName::WinFixHeight => {
                self.winfixheight = value.as_boolean().ok_or_else(mismatch)?
            }
            OptionName::WinMinHeight => {
                self.winminheight = value.as_integer().ok_or_else(mismatch)?
            }
            OptionName::WinMinWidth => {
                self.winminwidth = value.as_integer().ok_or_else(mismatch)?
            }
            OptionName::WinHeight => self.winheight = value.as_integer().ok_or_else(mismatch)?,
            OptionName::WinWidth => self.winwidth = value.as_integer().ok_or_else(mismatch)?,
        }
        Ok(())
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialize from a TOML string; missing fields fall back to defaults.
    pub fn from_toml(s: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
