/// Finds the longest registered name at the start of the input.
///
/// The scan walks the input one character at a time and narrows the set of
/// names that still agree with everything read so far. It remembers the
/// longest name matched completely and stops as soon as no candidate is left,
/// or a single candidate remains that has just been matched completely.
///
/// The scanner never backtracks: once the longest name is chosen, a shorter
/// one is not tried even if the longer one leads to a parse error later.
///
/// # Example
/// ```
/// use arbeval::interpreter::parser::names::NameScanner;
///
/// let scanner = NameScanner::new(["a", "abc"]);
/// assert_eq!(scanner.longest_match("ab"), Some("a"));
/// assert_eq!(scanner.longest_match("abc"), Some("abc"));
/// assert_eq!(scanner.longest_match("b"), None);
/// ```
#[derive(Debug, Clone)]
pub struct NameScanner<'r> {
    names: Vec<&'r str>,
}

impl<'r> NameScanner<'r> {
    /// Creates a scanner over `names`.
    pub fn new<I>(names: I) -> Self
        where I: IntoIterator<Item = &'r str>
    {
        Self { names: names.into_iter().collect() }
    }

    /// Returns the longest name that is a prefix of `input`, if any.
    #[must_use]
    pub fn longest_match(&self, input: &str) -> Option<&'r str> {
        let mut candidates = self.names.clone();
        let mut longest = None;

        for (i, byte) in input.bytes().enumerate() {
            candidates.retain(|name| name.as_bytes().get(i) == Some(&byte));
            match candidates.as_slice() {
                [] => break,
                [only] if only.len() == i + 1 => return Some(*only),
                _ => {},
            }
            if let Some(exact) = candidates.iter().find(|name| name.len() == i + 1) {
                longest = Some(*exact);
            }
        }

        log::trace!("longest name at {input:?}: {longest:?}");
        longest
    }
}
