/// Upper-case the first character and lower-case the rest.
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Number of characters counted the way the form counts them.
pub fn char_len(input: &str) -> usize {
    input.chars().count()
}
