/// Splits `text` into lowercase alphanumeric tokens of at least `min_length` characters.
///
/// The same function is used when building the keyword index and when parsing queries.
pub fn tokenize(text: &str, min_length: usize) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(move |token| !token.is_empty() && token.chars().count() >= min_length)
        .map(str::to_lowercase)
}
