/// A text substitution applied to formulas before they are parsed.
///
/// The context treats it as opaque: it hands over the source and parses
/// whatever comes back. Any closure from `&str` to `String` is an expander.
///
/// # Example
/// ```
/// use arbeval::context::DoubleContext;
///
/// let mut context = DoubleContext::standard();
/// context.set_macro_expander(Some(std::rc::Rc::new(|source: &str| source.replace("tau", "(2*pi)"))));
/// assert_eq!(context.evaluate("cos(tau)").unwrap(), 1.0);
/// ```
pub trait MacroExpander {
    /// Returns the expanded form of `source`.
    fn expand(&self, source: &str) -> String;
}

impl<F> MacroExpander for F where F: Fn(&str) -> String
{
    fn expand(&self, source: &str) -> String {
        self(source)
    }
}
