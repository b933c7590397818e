use herotris_engine::PieceKind;
use ratatui::style::Color;

/// Display identity of a piece kind.
#[derive(Debug, Clone, Copy)]
pub struct Hero {
    pub name: &'static str,
    /// Two-character tag drawn inside each cell.
    pub tag: &'static str,
    pub color: Color,
}

/// Heroes indexed by [`PieceKind::hero_index`].
pub const HEROES: [Hero; PieceKind::LEN] = [
    Hero {
        name: "Thor",
        tag: "Th",
        color: Color::Rgb(70, 130, 230),
    },
    Hero {
        name: "Iron Man",
        tag: "IM",
        color: Color::Rgb(200, 40, 40),
    },
    Hero {
        name: "Captain America",
        tag: "CA",
        color: Color::Rgb(230, 230, 240),
    },
    Hero {
        name: "Black Widow",
        tag: "BW",
        color: Color::Rgb(150, 60, 170),
    },
    Hero {
        name: "Hulk",
        tag: "Hk",
        color: Color::Rgb(60, 180, 60),
    },
];

#[must_use]
pub fn hero(kind: PieceKind) -> &'static Hero {
    &HEROES[kind.hero_index()]
}
