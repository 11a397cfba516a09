use chameleon_types::{GameError, ThemeInfo};

pub const DEFAULT_THEME_ID: &str = "animals";

/// Ordered list of themes the players can pick from
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: Vec<ThemeInfo>,
}

impl ThemeRegistry {
    pub fn new(themes: Vec<ThemeInfo>) -> Self {
        Self { themes }
    }

    /// Built-in themes shipped with the game data files
    pub fn builtin() -> Self {
        Self::new(vec![
            theme("animals", "Animals", "Creatures great and small", "🦁", "/animals.json"),
            theme("food", "Food", "Dishes, snacks and ingredients", "🍕", "/food.json"),
            theme("movies", "Movies", "Famous films everyone has seen", "🎬", "/movies.json"),
            theme("places", "Places", "Cities, landmarks and countries", "🗺️", "/places.json"),
            theme("sports", "Sports", "Games, teams and equipment", "⚽", "/sports.json"),
        ])
    }

    pub fn themes(&self) -> &[ThemeInfo] {
        &self.themes
    }

    pub fn get(&self, theme_id: &str) -> Result<&ThemeInfo, GameError> {
        self.themes
            .iter()
            .find(|t| t.id == theme_id)
            .ok_or_else(|| GameError::UnknownTheme {
                theme_id: theme_id.to_string(),
            })
    }

    /// Configured default, falling back to the first registered theme
    pub fn default_theme(&self, preferred: &str) -> Result<&ThemeInfo, GameError> {
        self.get(preferred).or_else(|err| self.themes.first().ok_or(err))
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn theme(id: &str, name: &str, description: &str, icon: &str, file_path: &str) -> ThemeInfo {
    ThemeInfo {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        file_path: file_path.to_string(),
    }
}
