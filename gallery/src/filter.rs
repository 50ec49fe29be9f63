use api_client::{Photo, PhotoId};

/// Category options offered to the user. Matched against the author name.
pub const CATEGORIES: [&str; 3] = ["Natureza", "Arquitetura", "Retratos"];
pub const COLORS: [&str; 2] = ["Preto e Branco", "Colorido"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: String,
    pub category: String,
    pub color: String,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.category.is_empty() && self.color.is_empty()
    }
}

/// Color bucket. Photos carry no color data, so the bucket is picked by id
/// parity: even ids count as black and white.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFilter {
    BlackAndWhite,
    Colored,
}

impl ColorFilter {
    pub const ALL: [ColorFilter; 2] = [ColorFilter::BlackAndWhite, ColorFilter::Colored];

    /// Empty means no color filter. Any value other than black and white
    /// selects the colored bucket.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            None
        } else if value.eq_ignore_ascii_case("Preto e Branco")
            || value.eq_ignore_ascii_case("black-and-white")
        {
            Some(ColorFilter::BlackAndWhite)
        } else {
            Some(ColorFilter::Colored)
        }
    }

    pub fn matches(self, id: &PhotoId) -> bool {
        let even = has_even_numeric_id(id);
        match self {
            ColorFilter::BlackAndWhite => even,
            ColorFilter::Colored => !even,
        }
    }
}

impl std::fmt::Display for ColorFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ColorFilter::BlackAndWhite => "Preto e Branco",
            ColorFilter::Colored => "Colorido",
        };
        write!(f, "{}", s)
    }
}

// Ids that are not integers are never even.
fn has_even_numeric_id(id: &PhotoId) -> bool {
    let s = id.as_str().trim();
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    digits
        .bytes()
        .last()
        .map(|b| (b - b'0') % 2 == 0)
        .unwrap_or(false)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Derive the visible photos. Category, then color, then query; all must pass.
/// Input order is preserved.
pub fn apply<'a>(photos: &'a [Photo], criteria: &FilterCriteria) -> Vec<&'a Photo> {
    let color = ColorFilter::parse(&criteria.color);
    let query = criteria.query.as_str();
    let has_query = !query.trim().is_empty();

    photos
        .iter()
        .filter(|photo| {
            criteria.category.is_empty() || contains_ignore_case(&photo.author, &criteria.category)
        })
        .filter(|photo| color.map_or(true, |c| c.matches(&photo.id)))
        .filter(|photo| !has_query || contains_ignore_case(&photo.author, query))
        .collect()
}
