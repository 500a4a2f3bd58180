//! The lookup capability consumed by the candidate-generation side.

/// A dictionary token produced for a user vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Token {
    /// Reading: the caller's key stem followed by the key suffix.
    pub key: String,
    /// Surface form: the caller's value stem followed by the value suffix.
    pub value: String,
    pub pos_id: u16,
    pub conjugation_id: u16,
}

/// A POS name together with its numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PosEntry {
    pub name: String,
    pub id: u16,
}

/// POS resolution and token expansion for user-registered vocabulary.
///
/// Unknown POS names are an ordinary outcome and are reported through the
/// return values (`None`, `false`), never as errors.
pub trait UserPosDictionary: Send + Sync {
    /// Returns the names of all POS that have at least one token form, in
    /// ascending id order.
    fn pos_list(&self) -> Vec<String>;

    /// Returns `true` if `pos` names a known POS.
    fn is_valid_pos(&self, pos: &str) -> bool {
        self.pos_id(pos).is_some()
    }

    /// Resolves a POS name to its id.
    fn pos_id(&self, pos: &str) -> Option<u16>;

    /// Appends one token per conjugation form of `pos` to `tokens`.
    ///
    /// Existing contents of `tokens` are kept, so results of several calls can
    /// be accumulated in one collection. Returns `false`, leaving `tokens`
    /// untouched, when `pos` is unknown.
    fn get_tokens(&self, key: &str, value: &str, pos: &str, tokens: &mut Vec<Token>) -> bool;
}
