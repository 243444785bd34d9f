use std::time::Duration;

use floramaster::{
    DataEditor, Event, GameConfig, GameData, GameState, ImageGuessEngine, MatchItem,
    MatchingEngine, QuizEngine, RoundEvents, RoundOutcome, SessionController, SessionSummary,
    Settle, demo_game_data,
};
use rand::SeedableRng;

fn correct_index(options: &[floramaster::QuizOption]) -> usize {
    options
        .iter()
        .position(|option| option.is_correct)
        .expect("every option list has a correct entry")
}

fn play_quiz(data: &GameData, answer_correctly: bool) -> RoundOutcome {
    let mut quiz = QuizEngine::new(data.questions.clone(), Duration::ZERO);
    let mut events = RoundEvents::default();

    while let Some(question) = quiz.current() {
        let right = correct_index(&question.options);
        let choice = if answer_correctly {
            right
        } else {
            (right + 1) % question.options.len()
        };
        let ticket = quiz
            .submit_answer(choice, &mut events)
            .expect("input is open between questions");
        quiz.settle(ticket, &mut events);
    }

    events.completed().expect("quiz reports its outcome")
}

fn play_image_guessing(data: &GameData, seed: u64) -> RoundOutcome {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut game = ImageGuessEngine::new(&mut rng, &data.plants_for_guessing(), Duration::ZERO);
    let mut events = RoundEvents::default();

    if game.is_empty() {
        assert!(game.skip(&mut events));
    }
    while game.current().is_some() {
        let ticket = game
            .submit_answer(correct_index(game.options()), &mut events)
            .expect("input is open between rounds");
        if let Settle::Completed(outcome) = game.settle(ticket, &mut events) {
            assert_eq!(Some(outcome), events.completed());
        }
    }

    events.completed().expect("image guessing reports its outcome")
}

fn play_matching(data: &GameData, seed: u64) -> RoundOutcome {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut game = MatchingEngine::new(&mut rng, &data.images, &data.pairs);
    let mut events = RoundEvents::default();

    if game.is_empty() {
        assert!(game.skip(&mut events));
        return events.completed().expect("skipping reports an outcome");
    }

    for pair in data.pairs.clone() {
        game.select(MatchItem::Leaf(pair.leaf_id), &mut events);
        game.select(MatchItem::Tree(pair.tree_id), &mut events);
    }
    assert_eq!(events.correct_answers as usize, data.pairs.len());

    game.submit().expect("every leaf is matched");
    game.complete(&mut events).expect("completes once after submission")
}

#[test]
fn perfect_playthrough_earns_the_trophy() {
    let config = GameConfig::default();
    let mut controller = SessionController::new();
    controller.data_loaded(demo_game_data());

    controller
        .dispatch(Event::AnimationComplete)
        .expect("intro always ends");
    assert_eq!(controller.dispatch(Event::StartGame), Ok(GameState::Quiz));

    let data = controller.data().cloned().expect("data is ready");

    let quiz = play_quiz(&data, true);
    assert_eq!(quiz, RoundOutcome::new(4, 4));
    controller
        .dispatch(Event::CompleteQuiz(quiz))
        .expect("quiz completion is accepted");
    assert_eq!(controller.state().running_score(), 4);

    let plants = play_image_guessing(&data, 7);
    assert_eq!(plants, RoundOutcome::new(3, 3));
    controller
        .dispatch(Event::CompleteImageGuessing(plants))
        .expect("image guessing completion is accepted");

    let matching = play_matching(&data, 11);
    assert_eq!(matching, RoundOutcome::new(3, 3));
    assert_eq!(
        controller.dispatch(Event::CompleteMatching(matching)),
        Ok(GameState::End)
    );

    let summary = SessionSummary::from_state(controller.state(), config.trophy_threshold);
    assert_eq!(summary.total_score, 10);
    assert_eq!(summary.total_possible, 10);
    assert_eq!(summary.percentage(), 100);
    assert!(summary.earned_trophy);
}

#[test]
fn poor_quiz_misses_the_trophy_and_restart_clears_scores() {
    let mut controller = SessionController::with_data(demo_game_data());
    controller
        .dispatch(Event::AnimationComplete)
        .expect("intro always ends");
    controller.dispatch(Event::StartGame).expect("data is ready");

    let data = demo_game_data();
    controller
        .dispatch(Event::CompleteQuiz(play_quiz(&data, false)))
        .expect("quiz completion is accepted");
    controller
        .dispatch(Event::CompleteImageGuessing(RoundOutcome::new(1, 3)))
        .expect("image guessing completion is accepted");
    controller
        .dispatch(Event::CompleteMatching(RoundOutcome::new(2, 3)))
        .expect("matching completion is accepted");

    let summary = SessionSummary::from_state(controller.state(), 0.7);
    assert_eq!(summary.total_score, 3);
    assert_eq!(summary.total_possible, 10);
    assert!(!summary.earned_trophy);

    assert_eq!(controller.dispatch(Event::Restart), Ok(GameState::Setup));
    assert_eq!(controller.state().running_score(), 0);
    assert_eq!(controller.state().totals.sum(), 0);
}

#[test]
fn edited_data_without_pairs_skips_matching() {
    let mut controller = SessionController::with_data(demo_game_data());
    controller
        .dispatch(Event::AnimationComplete)
        .expect("intro always ends");
    controller
        .dispatch(Event::EnterEditMode)
        .expect("data is ready");

    let mut editor = DataEditor::new(controller.data().cloned().expect("data is ready"));
    while !editor.data().pairs.is_empty() {
        editor.remove_pair(0).expect("pair exists");
    }
    controller
        .dispatch(Event::ExitEditMode(Some(editor.finish())))
        .expect("leaving the editor is accepted");
    controller.dispatch(Event::StartGame).expect("data is ready");

    let data = controller.data().cloned().expect("edited data is kept");
    assert!(data.pairs.is_empty());

    controller
        .dispatch(Event::CompleteQuiz(play_quiz(&data, true)))
        .expect("quiz completion is accepted");
    controller
        .dispatch(Event::CompleteImageGuessing(play_image_guessing(&data, 3)))
        .expect("image guessing completion is accepted");

    let matching = play_matching(&data, 5);
    assert_eq!(matching, RoundOutcome::SKIPPED);
    controller
        .dispatch(Event::CompleteMatching(matching))
        .expect("skipped matching is accepted");

    let summary = SessionSummary::from_state(controller.state(), 0.7);
    assert_eq!(summary.total_possible, 7);
    assert_eq!(summary.total_score, 7);
}

#[test]
fn session_waits_for_data() {
    let mut controller = SessionController::new();
    controller
        .dispatch(Event::AnimationComplete)
        .expect("intro always ends");

    assert!(controller.dispatch(Event::StartGame).is_err());
    assert_eq!(controller.game_state(), GameState::Setup);

    controller.data_failed("network unreachable");
    assert!(controller.dispatch(Event::EnterEditMode).is_err());

    controller.data_loaded(demo_game_data());
    assert_eq!(controller.dispatch(Event::EnterEditMode), Ok(GameState::Edit));
}
