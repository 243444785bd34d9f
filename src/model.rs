use std::collections::HashSet;
use std::fmt;

/// A single answer choice attached to a question or a plant image.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    pub text: String,
    pub is_correct: bool,
}

impl QuizOption {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }
}

/// A trivia question asked during the quiz round.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: u32,
    /// Prompt text. Fragments wrapped in underscores are shown in italics.
    pub question_text: String,
    pub options: Vec<QuizOption>,
}

/// What an image depicts. Drives which round the image takes part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Leaf,
    Tree,
    Plant,
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ImageKind::Leaf => "leaf",
            ImageKind::Tree => "tree",
            ImageKind::Plant => "plant",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameImage {
    /// Unique across every image in the dataset.
    pub id: u32,
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ImageKind,
    /// Name choices, only present on plant images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<QuizOption>>,
}

impl GameImage {
    /// Returns `true` when the image can be used in the image guessing round.
    pub fn is_guessable(&self) -> bool {
        match self.kind {
            ImageKind::Plant => self.options.as_ref().is_some_and(|options| !options.is_empty()),
            ImageKind::Leaf | ImageKind::Tree => false,
        }
    }
}

/// A correct botanical pairing of a leaf image with its tree image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafTreePair {
    pub leaf_id: u32,
    pub tree_id: u32,
}

impl LeafTreePair {
    pub fn new(leaf_id: u32, tree_id: u32) -> Self {
        Self { leaf_id, tree_id }
    }
}

/// The full content of a game: questions, images and leaf/tree pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameData {
    pub questions: Vec<QuizQuestion>,
    pub images: Vec<GameImage>,
    pub pairs: Vec<LeafTreePair>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DataError {
    #[error("question id {0} is used more than once")]
    DuplicateQuestionId(u32),
    #[error("image id {0} is used more than once")]
    DuplicateImageId(u32),
    #[error("{owner} must have exactly one correct option but has {correct}")]
    CorrectOptionCount { owner: String, correct: usize },
    #[error("{kind} image {id} cannot carry answer options")]
    UnexpectedOptions { id: u32, kind: ImageKind },
    #[error("pair references image {id} which is not a {expected} image")]
    InvalidPairReference { id: u32, expected: ImageKind },
    #[error("leaf image {0} is paired with more than one tree")]
    SharedPairLeaf(u32),
    #[error("tree image {0} is paired with more than one leaf")]
    SharedPairTree(u32),
}

impl GameData {
    pub fn image(&self, id: u32) -> Option<&GameImage> {
        self.images.iter().find(|image| image.id == id)
    }

    pub fn images_of_kind(&self, kind: ImageKind) -> impl Iterator<Item = &GameImage> {
        self.images.iter().filter(move |image| image.kind == kind)
    }

    /// Plant images that carry at least one option, in dataset order.
    pub fn plants_for_guessing(&self) -> Vec<GameImage> {
        self.images
            .iter()
            .filter(|image| image.is_guessable())
            .cloned()
            .collect()
    }

    /// Checks the content invariants the rounds rely on.
    ///
    /// # Errors
    /// Returns the first violation found: duplicate ids, an option list without exactly one
    /// correct entry, options on a leaf or tree image, a pair pointing at a missing or
    /// mistyped image, or a leaf or tree used by two pairs (the matching round could not be won).
    pub fn validate(&self) -> Result<(), DataError> {
        let mut question_ids = HashSet::new();
        for question in &self.questions {
            if !question_ids.insert(question.id) {
                return Err(DataError::DuplicateQuestionId(question.id));
            }
            check_single_correct(&question.options, || format!("question {}", question.id))?;
        }

        let mut image_ids = HashSet::new();
        for image in &self.images {
            if !image_ids.insert(image.id) {
                return Err(DataError::DuplicateImageId(image.id));
            }
            match (image.kind, &image.options) {
                (ImageKind::Plant, Some(options)) if !options.is_empty() => {
                    check_single_correct(options, || format!("plant image {}", image.id))?;
                }
                (ImageKind::Plant, _) => {}
                (kind @ (ImageKind::Leaf | ImageKind::Tree), Some(options)) if !options.is_empty() => {
                    return Err(DataError::UnexpectedOptions { id: image.id, kind });
                }
                (ImageKind::Leaf | ImageKind::Tree, _) => {}
            }
        }

        let mut paired_leaves = HashSet::new();
        let mut paired_trees = HashSet::new();
        for pair in &self.pairs {
            self.check_reference(pair.leaf_id, ImageKind::Leaf)?;
            self.check_reference(pair.tree_id, ImageKind::Tree)?;
            if !paired_leaves.insert(pair.leaf_id) {
                return Err(DataError::SharedPairLeaf(pair.leaf_id));
            }
            if !paired_trees.insert(pair.tree_id) {
                return Err(DataError::SharedPairTree(pair.tree_id));
            }
        }

        Ok(())
    }

    fn check_reference(&self, id: u32, expected: ImageKind) -> Result<(), DataError> {
        match self.image(id) {
            Some(image) if image.kind == expected => Ok(()),
            _ => Err(DataError::InvalidPairReference { id, expected }),
        }
    }
}

fn check_single_correct(
    options: &[QuizOption],
    owner: impl FnOnce() -> String,
) -> Result<(), DataError> {
    let correct = options.iter().filter(|option| option.is_correct).count();
    if correct == 1 {
        Ok(())
    } else {
        Err(DataError::CorrectOptionCount {
            owner: owner(),
            correct,
        })
    }
}
