/// A closed set of wire values, as sent and received by the remote API.
pub trait Choice: Sized + Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    /// Exact, case-sensitive match against the wire value.
    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|choice| choice.as_str() == value)
    }

    /// `'A' | 'B' | 'C'`, used in validation messages.
    fn expected() -> String {
        Self::ALL
            .iter()
            .map(|choice| format!("'{}'", choice.as_str()))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
