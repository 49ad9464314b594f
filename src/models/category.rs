use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cosmetics, // 화장품
    Game,      // 게임
    Celebrity, // 연예인
    Character, // 캐릭터
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Cosmetics,
        Category::Game,
        Category::Celebrity,
        Category::Character,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Category::Cosmetics => "cosmetics",
            Category::Game => "game",
            Category::Celebrity => "celebrity",
            Category::Character => "character",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "cosmetics" => Some(Category::Cosmetics),
            "game" => Some(Category::Game),
            "celebrity" => Some(Category::Celebrity),
            "character" => Some(Category::Character),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Cosmetics => "화장품",
            Category::Game => "게임",
            Category::Celebrity => "연예인",
            Category::Character => "캐릭터",
        }
    }

    /// Helper: accept the code in any case, or the Korean label.
    pub fn from_code(code: &str) -> Option<Self> {
        let c = code.trim();
        Category::from_db_str(&c.to_lowercase())
            .or_else(|| Category::ALL.into_iter().find(|cat| cat.label() == c))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum District {
    Dongdaemun,
    Seongsu,
    Yeouido,
    Jamsil,
    Gangnam,
    Apgujeong,
    Hongdae,
}

impl District {
    pub const ALL: [District; 7] = [
        District::Dongdaemun,
        District::Seongsu,
        District::Yeouido,
        District::Jamsil,
        District::Gangnam,
        District::Apgujeong,
        District::Hongdae,
    ];

    pub fn to_db_str(&self) -> &'static str {
        match self {
            District::Dongdaemun => "dongdaemun",
            District::Seongsu => "seongsu",
            District::Yeouido => "yeouido",
            District::Jamsil => "jamsil",
            District::Gangnam => "gangnam",
            District::Apgujeong => "apgujeong",
            District::Hongdae => "hongdae",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        District::ALL.into_iter().find(|d| d.to_db_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            District::Dongdaemun => "동대문",
            District::Seongsu => "성수",
            District::Yeouido => "여의도",
            District::Jamsil => "잠실",
            District::Gangnam => "강남",
            District::Apgujeong => "압구정",
            District::Hongdae => "홍대",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let c = code.trim();
        District::from_db_str(&c.to_lowercase())
            .or_else(|| District::ALL.into_iter().find(|d| d.label() == c))
    }
}

/// A filter choice: either the `all` sentinel or one concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => value == Some(wanted),
        }
    }
}

impl<T> Selection<T> {
    /// Parse `all` (any case) or delegate to `parse` for a concrete value.
    pub fn parse_with<F>(raw: &str, parse: F) -> Option<Self>
    where
        F: FnOnce(&str) -> Option<T>,
    {
        if raw.trim().eq_ignore_ascii_case("all") {
            Some(Selection::All)
        } else {
            parse(raw).map(Selection::Only)
        }
    }
}
