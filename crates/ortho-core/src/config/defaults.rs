pub(super) fn default_log_level() -> String {
    "info".to_string()
}
pub(super) fn default_prefix() -> String {
    "!".to_string()
}
pub(super) fn default_grammar_url() -> String {
    "https://api.languagetool.org".to_string()
}
pub(super) fn default_language() -> String {
    "ru-RU".to_string()
}
pub(super) fn default_timeout_secs() -> u64 {
    30
}
pub(super) fn default_max_text_length() -> usize {
    20_000
}
pub(super) fn default_true() -> bool {
    true
}
