use crate::dataset::ImportError;
use crate::model::{GameData, GameImage, ImageKind, LeafTreePair, QuizOption, QuizQuestion};

const PLACEHOLDER_IMAGE_URL: &str = "https://picsum.photos/seed/default/400/400";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("no question with id {0}")]
    UnknownQuestion(u32),
    #[error("no image with id {0}")]
    UnknownImage(u32),
    #[error("image {0} has no answer options")]
    NoOptions(u32),
    #[error("option index {index} is out of range for {len} options")]
    OptionOutOfRange { index: usize, len: usize },
    #[error("no pair at index {0}")]
    UnknownPair(usize),
    #[error("at least one leaf and one tree image are needed to create a pair")]
    MissingLeafOrTree,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataEditor {
    draft: GameData,
}

fn next_id(ids: impl Iterator<Item = u32>) -> u32 {
    ids.max().unwrap_or(0) + 1
}

fn default_options(correct: &str, wrong: [&str; 2]) -> Vec<QuizOption> {
    let mut options = vec![QuizOption::new(correct, true)];
    options.extend(wrong.into_iter().map(|text| QuizOption::new(text, false)));
    options
}

fn set_single_correct(options: &mut [QuizOption], index: usize) -> Result<(), EditorError> {
    if index >= options.len() {
        return Err(EditorError::OptionOutOfRange {
            index,
            len: options.len(),
        });
    }
    for (position, option) in options.iter_mut().enumerate() {
        option.is_correct = position == index;
    }
    Ok(())
}

fn option_mut(options: &mut [QuizOption], index: usize) -> Result<&mut QuizOption, EditorError> {
    let len = options.len();
    options
        .get_mut(index)
        .ok_or(EditorError::OptionOutOfRange { index, len })
}

impl DataEditor {
    pub fn new(data: GameData) -> Self {
        Self { draft: data }
    }

    pub fn data(&self) -> &GameData {
        &self.draft
    }

    /// Ends the editing session and returns the edited dataset.
    pub fn finish(self) -> GameData {
        self.draft
    }

    fn question_mut(&mut self, id: u32) -> Result<&mut QuizQuestion, EditorError> {
        self.draft
            .questions
            .iter_mut()
            .find(|question| question.id == id)
            .ok_or(EditorError::UnknownQuestion(id))
    }

    fn image_mut(&mut self, id: u32) -> Result<&mut GameImage, EditorError> {
        self.draft
            .images
            .iter_mut()
            .find(|image| image.id == id)
            .ok_or(EditorError::UnknownImage(id))
    }

    fn image_options_mut(&mut self, id: u32) -> Result<&mut Vec<QuizOption>, EditorError> {
        self.image_mut(id)?
            .options
            .as_mut()
            .ok_or(EditorError::NoOptions(id))
    }

    /// Adds a placeholder question with three options, the first one correct.
    pub fn add_question(&mut self) -> u32 {
        let id = next_id(self.draft.questions.iter().map(|question| question.id));
        self.draft.questions.push(QuizQuestion {
            id,
            question_text: "New question".to_string(),
            options: default_options("Option 1", ["Option 2", "Option 3"]),
        });
        id
    }

    pub fn remove_question(&mut self, id: u32) -> Result<(), EditorError> {
        let before = self.draft.questions.len();
        self.draft.questions.retain(|question| question.id != id);
        if self.draft.questions.len() == before {
            return Err(EditorError::UnknownQuestion(id));
        }
        Ok(())
    }

    pub fn set_question_text(&mut self, id: u32, text: impl Into<String>) -> Result<(), EditorError> {
        self.question_mut(id)?.question_text = text.into();
        Ok(())
    }

    pub fn set_question_option_text(
        &mut self,
        id: u32,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), EditorError> {
        let question = self.question_mut(id)?;
        option_mut(&mut question.options, index)?.text = text.into();
        Ok(())
    }

    /// Marks the option at `index` as the only correct answer.
    pub fn set_question_correct_option(&mut self, id: u32, index: usize) -> Result<(), EditorError> {
        set_single_correct(&mut self.question_mut(id)?.options, index)
    }

    /// Adds a placeholder image. Plants get three name options, the first one correct.
    pub fn add_image(&mut self, kind: ImageKind) -> u32 {
        let id = next_id(self.draft.images.iter().map(|image| image.id));
        let options = match kind {
            ImageKind::Plant => Some(default_options(
                "Correct option",
                ["Wrong option 1", "Wrong option 2"],
            )),
            ImageKind::Leaf | ImageKind::Tree => None,
        };
        self.draft.images.push(GameImage {
            id,
            name: format!("New {kind}"),
            url: PLACEHOLDER_IMAGE_URL.to_string(),
            kind,
            options,
        });
        id
    }

    /// Removes an image together with every pair that references it.
    pub fn remove_image(&mut self, id: u32) -> Result<(), EditorError> {
        let before = self.draft.images.len();
        self.draft.images.retain(|image| image.id != id);
        if self.draft.images.len() == before {
            return Err(EditorError::UnknownImage(id));
        }
        self.draft
            .pairs
            .retain(|pair| pair.leaf_id != id && pair.tree_id != id);
        Ok(())
    }

    pub fn set_image_name(&mut self, id: u32, name: impl Into<String>) -> Result<(), EditorError> {
        self.image_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_image_url(&mut self, id: u32, url: impl Into<String>) -> Result<(), EditorError> {
        self.image_mut(id)?.url = url.into();
        Ok(())
    }

    pub fn set_image_option_text(
        &mut self,
        id: u32,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), EditorError> {
        let options = self.image_options_mut(id)?;
        option_mut(options, index)?.text = text.into();
        Ok(())
    }

    pub fn set_image_correct_option(&mut self, id: u32, index: usize) -> Result<(), EditorError> {
        set_single_correct(self.image_options_mut(id)?, index)
    }

    /// Adds a pair linking the first leaf image with the first tree image.
    pub fn add_pair(&mut self) -> Result<usize, EditorError> {
        let leaf = self.draft.images_of_kind(ImageKind::Leaf).next();
        let tree = self.draft.images_of_kind(ImageKind::Tree).next();

        let (Some(leaf), Some(tree)) = (leaf, tree) else {
            return Err(EditorError::MissingLeafOrTree);
        };

        let pair = LeafTreePair::new(leaf.id, tree.id);
        self.draft.pairs.push(pair);
        Ok(self.draft.pairs.len() - 1)
    }

    pub fn set_pair(&mut self, index: usize, leaf_id: u32, tree_id: u32) -> Result<(), EditorError> {
        for id in [leaf_id, tree_id] {
            if self.draft.image(id).is_none() {
                return Err(EditorError::UnknownImage(id));
            }
        }
        let pair = self
            .draft
            .pairs
            .get_mut(index)
            .ok_or(EditorError::UnknownPair(index))?;
        *pair = LeafTreePair::new(leaf_id, tree_id);
        Ok(())
    }

    pub fn remove_pair(&mut self, index: usize) -> Result<LeafTreePair, EditorError> {
        if index >= self.draft.pairs.len() {
            return Err(EditorError::UnknownPair(index));
        }
        Ok(self.draft.pairs.remove(index))
    }

    /// Replaces the working copy with an imported document. On error the copy is unchanged.
    pub fn import_json(&mut self, json: &str) -> Result<(), ImportError> {
        self.draft.import(json)
    }

    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        self.draft.to_json_pretty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_game_data;

    #[test]
    fn new_question_gets_next_id_and_one_correct_option() {
        let mut editor = DataEditor::new(demo_game_data());
        let highest = demo_game_data()
            .questions
            .iter()
            .map(|question| question.id)
            .max()
            .unwrap_or(0);

        let id = editor.add_question();

        assert_eq!(id, highest + 1);
        let question = editor
            .data()
            .questions
            .iter()
            .find(|question| question.id == id)
            .expect("question was added");
        assert_eq!(question.options.len(), 3);
        assert!(question.options[0].is_correct);
        assert_eq!(editor.data().validate(), Ok(()));
    }

    #[test]
    fn first_id_in_empty_collection_is_one() {
        let mut editor = DataEditor::default();

        assert_eq!(editor.add_question(), 1);
        assert_eq!(editor.add_image(ImageKind::Leaf), 1);
        assert_eq!(editor.add_image(ImageKind::Tree), 2);
    }

    #[test]
    fn choosing_correct_option_keeps_exactly_one() {
        let mut editor = DataEditor::default();
        let id = editor.add_question();

        editor
            .set_question_correct_option(id, 2)
            .expect("option exists");

        let flags: Vec<bool> = editor.data().questions[0]
            .options
            .iter()
            .map(|option| option.is_correct)
            .collect();
        assert_eq!(flags, vec![false, false, true]);
        assert_eq!(
            editor.set_question_correct_option(id, 5),
            Err(EditorError::OptionOutOfRange { index: 5, len: 3 })
        );
    }

    #[test]
    fn only_plants_receive_options() {
        let mut editor = DataEditor::default();

        let plant = editor.add_image(ImageKind::Plant);
        let leaf = editor.add_image(ImageKind::Leaf);

        assert!(editor.data().image(plant).is_some_and(GameImage::is_guessable));
        assert_eq!(
            editor.set_image_correct_option(leaf, 0),
            Err(EditorError::NoOptions(leaf))
        );
        editor
            .set_image_option_text(plant, 1, "_Rosmarinus officinalis_")
            .expect("plant option exists");
    }

    #[test]
    fn pair_needs_a_leaf_and_a_tree() {
        let mut editor = DataEditor::default();
        editor.add_image(ImageKind::Leaf);

        assert_eq!(editor.add_pair(), Err(EditorError::MissingLeafOrTree));

        let tree = editor.add_image(ImageKind::Tree);
        assert_eq!(editor.add_pair(), Ok(0));
        assert_eq!(editor.data().pairs, vec![LeafTreePair::new(1, tree)]);
    }

    #[test]
    fn removing_an_image_drops_its_pairs() {
        let mut editor = DataEditor::default();
        let leaf = editor.add_image(ImageKind::Leaf);
        editor.add_image(ImageKind::Tree);
        editor.add_pair().expect("pair can be created");

        editor.remove_image(leaf).expect("image exists");

        assert!(editor.data().pairs.is_empty());
        assert_eq!(editor.remove_image(leaf), Err(EditorError::UnknownImage(leaf)));
    }

    #[test]
    fn pairs_can_be_retargeted_and_removed() {
        let mut editor = DataEditor::default();
        editor.add_image(ImageKind::Leaf);
        editor.add_image(ImageKind::Tree);
        let second_leaf = editor.add_image(ImageKind::Leaf);
        let index = editor.add_pair().expect("pair can be created");

        editor.set_pair(index, second_leaf, 2).expect("ids exist");
        assert_eq!(editor.data().pairs[index], LeafTreePair::new(second_leaf, 2));
        assert_eq!(editor.set_pair(index, 40, 2), Err(EditorError::UnknownImage(40)));

        assert_eq!(editor.remove_pair(index), Ok(LeafTreePair::new(second_leaf, 2)));
        assert_eq!(editor.remove_pair(index), Err(EditorError::UnknownPair(index)));
    }

    #[test]
    fn bad_import_leaves_draft_untouched() {
        let mut editor = DataEditor::new(demo_game_data());
        editor.add_question();
        let before = editor.data().clone();

        let result = editor.import_json(r#"{ "questions": [], "pairs": [] }"#);

        assert_eq!(result, Err(ImportError::MissingKey("images")));
        assert_eq!(editor.data(), &before);
    }

    #[test]
    fn finish_returns_the_edited_copy() {
        let mut editor = DataEditor::new(demo_game_data());
        let id = editor.add_question();
        editor
            .set_question_text(id, "Which organ performs photosynthesis?")
            .expect("question exists");

        let data = editor.finish();

        assert_eq!(data.questions.len(), demo_game_data().questions.len() + 1);
        assert_eq!(
            data.questions.last().map(|question| question.question_text.as_str()),
            Some("Which organ performs photosynthesis?")
        );
    }
}
