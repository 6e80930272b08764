/// One row of the rubric: a domain, its indicators and a description per level.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RubricRecord {
    pub domain: String,
    pub indicators: String,
    pub emerging: String,
    pub developing: String,
    pub embedding: String,
    pub excelling: String,
}

impl RubricRecord {
    pub fn description(&self, level: Level) -> &str {
        match level {
            Level::Emerging => &self.emerging,
            Level::Developing => &self.developing,
            Level::Embedding => &self.embedding,
            Level::Excelling => &self.excelling,
        }
    }

    pub fn has_domain(&self) -> bool {
        !self.domain.trim().is_empty()
    }
}

/// Maturity stage a domain can be rated at, in ascending order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Emerging,
    Developing,
    Embedding,
    Excelling,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::Emerging,
        Level::Developing,
        Level::Embedding,
        Level::Excelling,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Level::Emerging => "Emerging",
            Level::Developing => "Developing",
            Level::Embedding => "Embedding",
            Level::Excelling => "Excelling",
        }
    }

    /// Case-insensitive lookup by level name. Blank input means "not rated".
    pub fn parse(name: &str) -> Option<Level> {
        let name = name.trim();
        Level::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(name))
    }
}

pub const NOT_RATED: &str = "Not rated";

/// Label shown in the rating box: the level name, or "Not rated".
pub fn rating_label(rating: Option<Level>) -> &'static str {
    rating.map_or(NOT_RATED, Level::name)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
    Regular,
    Bold,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RatingBox {
    pub level: Option<Level>,
    pub label: String,
    pub description: String,
    /// Height the box occupies even when its description is short.
    pub min_height: f32,
}

impl RatingBox {
    pub fn is_highlighted(&self) -> bool {
        self.level.is_some()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ContentBlock {
    Heading(String),
    Rule,
    Paragraph {
        text: String,
        emphasis: Emphasis,
        color: Option<[u8; 3]>,
    },
    HighlightedBox(RatingBox),
    BulletList {
        title: String,
        items: Vec<String>,
    },
}
