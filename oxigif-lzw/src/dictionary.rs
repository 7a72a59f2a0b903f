//! LZW dictionary (code table) management.

use crate::config::LzwConfig;
use std::collections::HashMap;

/// LZW code table for encoding.
///
/// Every multi-symbol string is identified by the code of its prefix plus
/// the symbol that extends it, so a lookup never has to materialize the
/// string itself. Single symbols are their own codes and are never stored.
#[derive(Debug)]
pub struct LzwDictionary {
    /// (prefix code, next symbol) -> code.
    table: HashMap<(u16, u8), u16>,
    /// Configuration.
    config: LzwConfig,
    /// Next available code.
    next_code: u16,
    /// Current code bit width.
    code_size: u8,
}

impl LzwDictionary {
    /// Create a new LZW dictionary with the given configuration.
    pub fn new(config: LzwConfig) -> Self {
        let mut dict = Self {
            table: HashMap::with_capacity(config.max_code() as usize + 1),
            config,
            next_code: 0,
            code_size: 0,
        };
        dict.reset();
        dict
    }

    /// Reset the dictionary to its initial state.
    pub fn reset(&mut self) {
        self.table.clear();
        self.next_code = self.config.first_code();
        self.code_size = self.config.initial_code_size();
    }

    /// Look up the code for `prefix` extended by `symbol`.
    #[inline]
    pub fn find(&self, prefix: u16, symbol: u8) -> Option<u16> {
        self.table.get(&(prefix, symbol)).copied()
    }

    /// Assign the next free code to `prefix` extended by `symbol`.
    ///
    /// Returns `None` without touching the table once every code up to the
    /// configured maximum has been handed out.
    pub fn insert(&mut self, prefix: u16, symbol: u8) -> Option<u16> {
        if self.is_full() {
            return None;
        }

        let code = self.next_code;
        self.table.insert((prefix, symbol), code);
        self.next_code += 1;
        Some(code)
    }

    /// Widen codes once the next code no longer fits.
    ///
    /// Called after each code is emitted, before the entry that code implies
    /// is added. A decoder adds that entry while reading the code and widens
    /// as soon as its own next code reaches `2^code_size`, which is exactly
    /// this condition.
    pub fn grow_code_size(&mut self) {
        if self.code_size < self.config.max_code_size && self.next_code >= 1 << self.code_size {
            self.code_size += 1;
        }
    }

    /// Check if every code has been assigned.
    pub fn is_full(&self) -> bool {
        self.next_code > self.config.max_code()
    }

    /// Number of multi-symbol strings currently in the table.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// True if no strings have been added since the last reset.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Get the current code width.
    pub fn code_size(&self) -> u8 {
        self.code_size
    }

    /// Get the next code that will be assigned.
    pub fn next_code(&self) -> u16 {
        self.next_code
    }

    /// Get the clear code.
    pub fn clear_code(&self) -> u16 {
        self.config.clear_code()
    }

    /// Get the end-of-information code.
    pub fn end_code(&self) -> u16 {
        self.config.end_code()
    }

    /// Get the configuration.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }
}
