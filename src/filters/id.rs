use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A filter identifier
///
/// The nine known filters form a closed set. Anything else a caller hands in
/// is kept verbatim as `Unknown` so it can still be slugged and exported
/// (as an unfiltered copy).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterId {
    None,
    Grayscale,
    Sepia,
    Negative,
    Posterize,
    Solarize,
    Cold,
    Warm,
    Vintage,
    Unknown(String),
}

impl FilterId {
    /// All known filters in canonical order
    pub const KNOWN: [FilterId; 9] = [
        FilterId::None,
        FilterId::Grayscale,
        FilterId::Sepia,
        FilterId::Negative,
        FilterId::Posterize,
        FilterId::Solarize,
        FilterId::Cold,
        FilterId::Warm,
        FilterId::Vintage,
    ];

    /// Parse an identifier; never fails
    ///
    /// Known filters match their token or their slug, ignoring case and
    /// surrounding whitespace.
    pub fn parse(raw: &str) -> Self {
        let token = raw.trim().to_ascii_lowercase();
        Self::KNOWN
            .iter()
            .find(|id| id.token() == token || id.known_slug() == Some(token.as_str()))
            .cloned()
            .unwrap_or_else(|| FilterId::Unknown(raw.to_string()))
    }

    /// Canonical token, or the raw identifier for unknown filters
    pub fn token(&self) -> &str {
        match self {
            FilterId::None => "none",
            FilterId::Grayscale => "grayscale",
            FilterId::Sepia => "sepia",
            FilterId::Negative => "negative",
            FilterId::Posterize => "posterize",
            FilterId::Solarize => "solarize",
            FilterId::Cold => "cold",
            FilterId::Warm => "warm",
            FilterId::Vintage => "vintage",
            FilterId::Unknown(raw) => raw,
        }
    }

    /// Fixed file-name slug of a known filter
    pub fn known_slug(&self) -> Option<&'static str> {
        let slug = match self {
            FilterId::None => "no_filter",
            FilterId::Grayscale => "bw",
            FilterId::Sepia => "sepia",
            FilterId::Negative => "negative",
            FilterId::Posterize => "posterize",
            FilterId::Solarize => "solarize",
            FilterId::Cold => "cold",
            FilterId::Warm => "warm",
            FilterId::Vintage => "vintage",
            FilterId::Unknown(_) => return None,
        };
        Some(slug)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, FilterId::Unknown(_))
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for FilterId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// An immutable, ordered, duplicate-free snapshot of selected filters
///
/// Export batches only ever see this value, never the caller's live
/// selection, so later changes cannot leak into jobs already in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    filters: Vec<FilterId>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from raw identifier strings
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .map(|token| FilterId::parse(token.as_ref()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn contains(&self, filter: &FilterId) -> bool {
        self.filters.contains(filter)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterId> {
        self.filters.iter()
    }

    pub fn as_slice(&self) -> &[FilterId] {
        &self.filters
    }

    /// The filter to preview after `current`
    ///
    /// Wraps around at the end; an absent or unselected `current` restarts at
    /// the first entry.
    pub fn cycle_after(&self, current: Option<&FilterId>) -> Option<&FilterId> {
        if self.filters.is_empty() {
            return None;
        }
        let next = current
            .and_then(|c| self.filters.iter().position(|f| f == c))
            .map(|i| (i + 1) % self.filters.len())
            .unwrap_or(0);
        self.filters.get(next)
    }
}

impl FromIterator<FilterId> for FilterSelection {
    fn from_iter<I: IntoIterator<Item = FilterId>>(iter: I) -> Self {
        let mut filters: Vec<FilterId> = Vec::new();
        for filter in iter {
            if !filters.contains(&filter) {
                filters.push(filter);
            }
        }
        Self { filters }
    }
}

impl FromStr for FilterSelection {
    type Err = Infallible;

    /// Parse a comma-separated list, skipping blank entries
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tokens(
            s.split(',').filter(|piece| !piece.trim().is_empty()),
        ))
    }
}

impl<'a> IntoIterator for &'a FilterSelection {
    type Item = &'a FilterId;
    type IntoIter = std::slice::Iter<'a, FilterId>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}
