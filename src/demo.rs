use crate::model::{GameData, GameImage, ImageKind, LeafTreePair, QuizOption, QuizQuestion};

fn question(id: u32, text: &str, options: &[(&str, bool)]) -> QuizQuestion {
    QuizQuestion {
        id,
        question_text: text.to_string(),
        options: options
            .iter()
            .map(|(text, correct)| QuizOption::new(*text, *correct))
            .collect(),
    }
}

fn image(id: u32, kind: ImageKind, name: &str, seed: &str) -> GameImage {
    GameImage {
        id,
        name: name.to_string(),
        url: format!("https://picsum.photos/seed/{seed}/400/400"),
        kind,
        options: None,
    }
}

fn plant(id: u32, name: &str, seed: &str, options: &[(&str, bool)]) -> GameImage {
    GameImage {
        options: Some(
            options
                .iter()
                .map(|(text, correct)| QuizOption::new(*text, *correct))
                .collect(),
        ),
        ..image(id, ImageKind::Plant, name, seed)
    }
}

/// A small built-in dataset covering every mode.
pub fn demo_game_data() -> GameData {
    GameData {
        questions: vec![
            question(
                1,
                "The carob tree (_Ceratonia siliqua_) was grown across the Mediterranean. What were its seeds mainly used for?",
                &[
                    ("Decorating gardens and courtyards", false),
                    ("As a standard unit for weighing gold and spices", true),
                    ("Making ropes and household tools", false),
                ],
            ),
            question(
                2,
                "Which tissue carries water from the roots to the leaves?",
                &[
                    ("Phloem", false),
                    ("Xylem", true),
                    ("Cambium", false),
                    ("Epidermis", false),
                ],
            ),
            question(
                3,
                "What do stomata on a leaf mainly regulate?",
                &[
                    ("Gas exchange and water loss", true),
                    ("Sugar transport", false),
                    ("Root growth", false),
                ],
            ),
            question(
                4,
                "_Pinus halepensis_ belongs to which group of plants?",
                &[
                    ("Angiosperms", false),
                    ("Ferns", false),
                    ("Gymnosperms", true),
                ],
            ),
        ],
        images: vec![
            plant(
                1,
                "Rosemary",
                "rosemary",
                &[
                    ("_Rosmarinus officinalis_", true),
                    ("_Thymus vulgaris_", false),
                    ("_Lavandula dentata_", false),
                ],
            ),
            plant(
                2,
                "Oleander",
                "oleander",
                &[
                    ("_Myrtus communis_", false),
                    ("_Nerium oleander_", true),
                    ("_Pistacia lentiscus_", false),
                ],
            ),
            plant(
                3,
                "Dwarf fan palm",
                "palmito",
                &[
                    ("_Phoenix dactylifera_", false),
                    ("_Washingtonia robusta_", false),
                    ("_Chamaerops humilis_", true),
                ],
            ),
            image(4, ImageKind::Leaf, "Holm oak leaf", "holm-oak-leaf"),
            image(5, ImageKind::Leaf, "Olive leaf", "olive-leaf"),
            image(6, ImageKind::Leaf, "Carob leaf", "carob-leaf"),
            image(7, ImageKind::Tree, "Holm oak", "holm-oak"),
            image(8, ImageKind::Tree, "Olive tree", "olive-tree"),
            image(9, ImageKind::Tree, "Carob tree", "carob-tree"),
        ],
        pairs: vec![
            LeafTreePair::new(4, 7),
            LeafTreePair::new(5, 8),
            LeafTreePair::new(6, 9),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_data_is_valid() {
        assert_eq!(demo_game_data().validate(), Ok(()));
    }

    #[test]
    fn demo_data_feeds_every_mode() {
        let data = demo_game_data();

        assert!(!data.questions.is_empty());
        assert_eq!(data.plants_for_guessing().len(), 3);
        assert_eq!(data.pairs.len(), 3);
    }

    #[test]
    fn bundled_document_matches_demo_data() {
        let bundled = include_str!("../data/floramaster-data.json");

        assert_eq!(GameData::from_json(bundled), Ok(demo_game_data()));
    }
}
