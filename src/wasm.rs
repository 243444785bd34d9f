#![cfg(target_arch = "wasm32")]

use std::time::Duration;

use gloo_net::http::Request;
use leptos::*;
use rand::SeedableRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlAnchorElement, HtmlInputElement};

use crate::{
    DataEditor, DataStatus, EXPORT_FILE_NAME, Event, GameConfig, GameData, GameImage, GameState,
    ImageGuessEngine, ImageKind, MatchItem, MatchResult, MatchingEngine, PendingAnswer,
    QuizEngine, QuizOption, QuizQuestion, RoundEvents, RoundOutcome, SelectOutcome,
    SessionController, SessionSummary, SettleTicket, TextSpan, emphasis_spans,
};

const INTRO_DURATION: Duration = Duration::from_millis(3000);
const DOWNLOAD_URL_LIFETIME: Duration = Duration::from_millis(1000);

#[derive(Clone, Copy, PartialEq, Eq)]
enum Loading {
    Pending,
    Failed,
    Ready,
}

#[derive(Clone, PartialEq, Eq)]
enum Notice {
    Info(String),
    Error(String),
}

async fn fetch_game_data(url: &str) -> Result<GameData, String> {
    let text = Request::get(url)
        .send()
        .await
        .map_err(|error| error.to_string())?
        .text()
        .await
        .map_err(|error| error.to_string())?;

    GameData::from_json(&text).map_err(|error| error.to_string())
}

fn download_json(json: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(json));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = leptos::document();
    let link: HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(JsValue::from)?;
    link.set_href(&url);
    link.set_download(EXPORT_FILE_NAME);

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    body.append_child(&link)?;
    link.click();
    link.remove();

    // the browser reads the object URL after the click returns
    set_timeout(
        move || {
            if let Err(error) = web_sys::Url::revoke_object_url(&url) {
                log::warn!("could not release export URL: {error:?}");
            }
        },
        DOWNLOAD_URL_LIFETIME,
    );
    Ok(())
}

fn option_class(index: usize, pending: Option<PendingAnswer>, option: &QuizOption) -> &'static str {
    match pending {
        None => "option",
        Some(answer) if answer.selected == index && answer.correct => "option correct",
        Some(answer) if answer.selected == index => "option wrong",
        Some(_) if option.is_correct => "option reveal",
        Some(_) => "option muted",
    }
}

/// Schedules `ticket` and keeps the handle so leaving the screen can clear it.
fn schedule_settle(
    ticket: SettleTicket,
    timer: StoredValue<Option<TimeoutHandle>>,
    settle: impl FnOnce(SettleTicket) + 'static,
) {
    match set_timeout_with_handle(move || settle(ticket), ticket.delay()) {
        Ok(handle) => timer.set_value(Some(handle)),
        Err(error) => log::error!("could not schedule round advance: {error:?}"),
    }
}

fn clear_timer(timer: StoredValue<Option<TimeoutHandle>>) {
    if let Some(handle) = timer.try_get_value().flatten() {
        handle.clear();
    }
}

#[component]
fn Formatted(#[prop(into)] text: String) -> impl IntoView {
    emphasis_spans(&text)
        .into_iter()
        .map(|span| match span {
            TextSpan::Plain(plain) => plain.to_string().into_view(),
            TextSpan::Italic(italic) => view! { <i>{italic.to_string()}</i> }.into_view(),
        })
        .collect_view()
}

#[component]
fn SkipCard(
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    on_skip: Callback<()>,
) -> impl IntoView {
    view! {
        <section class="placeholder-card">
            <p class="eyebrow">{title}</p>
            <p class="lede">{message}</p>
            <button class="primary" on:click=move |_| on_skip.call(())>"Skip this game"</button>
        </section>
    }
}

#[component]
fn IntroScreen(on_done: Callback<()>) -> impl IntoView {
    let timer = store_value(None::<TimeoutHandle>);

    if let Ok(handle) = set_timeout_with_handle(move || on_done.call(()), INTRO_DURATION) {
        timer.set_value(Some(handle));
    }
    on_cleanup(move || clear_timer(timer));

    let skip = move |_| {
        clear_timer(timer);
        on_done.call(());
    };

    view! {
        <section class="intro" on:click=skip>
            <p class="headline">"Flora Master"</p>
            <p class="lede">"A botany challenge in three rounds"</p>
        </section>
    }
}

#[component]
fn SetupScreen(on_start: Callback<()>, on_edit: Callback<()>) -> impl IntoView {
    view! {
        <section class="panel">
            <p class="panel-title">"Ready to play?"</p>
            <p class="lede">
                "Answer the quiz, name the plants, then match every leaf to its tree."
            </p>
            <div class="header-actions">
                <button class="primary" on:click=move |_| on_start.call(())>"Start game"</button>
                <button class="pill" on:click=move |_| on_edit.call(())>"Edit data"</button>
            </div>
        </section>
    }
}

#[component]
fn QuizScreen(
    questions: Vec<QuizQuestion>,
    settle_delay: Duration,
    on_correct: Callback<()>,
    on_complete: Callback<RoundOutcome>,
) -> impl IntoView {
    let engine = create_rw_signal(QuizEngine::new(questions, settle_delay));
    let timer = store_value(None::<TimeoutHandle>);

    on_cleanup(move || {
        clear_timer(timer);
        engine.try_update_untracked(|engine| engine.cancel());
    });

    let settle = move |ticket: SettleTicket| {
        let mut events = RoundEvents::default();
        engine.try_update(|engine| engine.settle(ticket, &mut events));
        if let Some(outcome) = events.completed() {
            on_complete.call(outcome);
        }
    };

    let answer = move |index: usize| {
        let mut events = RoundEvents::default();
        let ticket = engine
            .try_update(|engine| engine.submit_answer(index, &mut events))
            .flatten();
        if events.correct_answers > 0 {
            on_correct.call(());
        }
        if let Some(ticket) = ticket {
            schedule_settle(ticket, timer, settle);
        }
    };

    let skip = Callback::new(move |_: ()| {
        let mut events = RoundEvents::default();
        engine.update(|engine| {
            engine.skip(&mut events);
        });
        if let Some(outcome) = events.completed() {
            on_complete.call(outcome);
        }
    });

    move || {
        engine.with(|state| {
            if state.is_empty() {
                return view! {
                    <SkipCard
                        title="Botany quiz"
                        message="No questions yet. Add some in the editor to play this round."
                        on_skip=skip
                    />
                }
                .into_view();
            }

            let Some(question) = state.current() else {
                return ().into_view();
            };
            let pending = state.pending();

            view! {
                <section class="quiz-card">
                    <p class="eyebrow">
                        {format!("Question {} of {}", state.position() + 1, state.total())}
                    </p>
                    <p class="prompt"><Formatted text=question.question_text.clone()/></p>
                    <div class="options-grid">
                        {question
                            .options
                            .iter()
                            .enumerate()
                            .map(|(index, option)| {
                                view! {
                                    <button
                                        class=option_class(index, pending, option)
                                        disabled=pending.is_some()
                                        on:click=move |_| answer(index)
                                    >
                                        <Formatted text=option.text.clone()/>
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                </section>
            }
            .into_view()
        })
    }
}

#[component]
fn ImageGuessScreen(
    plants: Vec<GameImage>,
    settle_delay: Duration,
    on_correct: Callback<()>,
    on_complete: Callback<RoundOutcome>,
) -> impl IntoView {
    let mut rng = rand::rngs::StdRng::from_entropy();
    let engine = create_rw_signal(ImageGuessEngine::new(&mut rng, &plants, settle_delay));
    let timer = store_value(None::<TimeoutHandle>);

    on_cleanup(move || {
        clear_timer(timer);
        engine.try_update_untracked(|engine| engine.cancel());
    });

    let settle = move |ticket: SettleTicket| {
        let mut events = RoundEvents::default();
        engine.try_update(|engine| engine.settle(ticket, &mut events));
        if let Some(outcome) = events.completed() {
            on_complete.call(outcome);
        }
    };

    let answer = move |index: usize| {
        let mut events = RoundEvents::default();
        let ticket = engine
            .try_update(|engine| engine.submit_answer(index, &mut events))
            .flatten();
        if events.correct_answers > 0 {
            on_correct.call(());
        }
        if let Some(ticket) = ticket {
            schedule_settle(ticket, timer, settle);
        }
    };

    let skip = Callback::new(move |_: ()| {
        let mut events = RoundEvents::default();
        engine.update(|engine| {
            engine.skip(&mut events);
        });
        if let Some(outcome) = events.completed() {
            on_complete.call(outcome);
        }
    });

    move || {
        engine.with(|state| {
            if state.is_empty() {
                return view! {
                    <SkipCard
                        title="Name that plant"
                        message="At least one plant with answer options is needed for this round."
                        on_skip=skip
                    />
                }
                .into_view();
            }

            let Some(image) = state.current() else {
                return ().into_view();
            };
            let pending = state.pending();

            view! {
                <section class="quiz-card">
                    <p class="eyebrow">
                        {format!("Round {} of {}", state.position() + 1, state.total())}
                    </p>
                    <img class="plant-photo" src=image.url.clone() alt="Plant to identify"/>
                    <div class="options-grid">
                        {state
                            .options()
                            .iter()
                            .enumerate()
                            .map(|(index, option)| {
                                view! {
                                    <button
                                        class=option_class(index, pending, option)
                                        disabled=pending.is_some()
                                        on:click=move |_| answer(index)
                                    >
                                        <Formatted text=option.text.clone()/>
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                </section>
            }
            .into_view()
        })
    }
}

#[component]
fn MatchingScreen(
    images: Vec<GameImage>,
    pairs: Vec<crate::LeafTreePair>,
    on_correct: Callback<()>,
    on_complete: Callback<RoundOutcome>,
) -> impl IntoView {
    let mut rng = rand::rngs::StdRng::from_entropy();
    let engine = create_rw_signal(MatchingEngine::new(&mut rng, &images, &pairs));
    let names = store_value(images);

    let name_of = move |id: Option<u32>| -> String {
        id.and_then(|id| {
            names.with_value(|images| {
                images
                    .iter()
                    .find(|image| image.id == id)
                    .map(|image| image.name.clone())
            })
        })
        .unwrap_or_else(|| "nothing".to_string())
    };

    let select = move |item: MatchItem| {
        let mut events = RoundEvents::default();
        let outcome = engine.try_update(|engine| engine.select(item, &mut events));
        if let Some(SelectOutcome::Matched { correct: true, .. }) = outcome {
            on_correct.call(());
        }
    };

    let finish = move |_| {
        let mut events = RoundEvents::default();
        engine.update(|engine| {
            engine.complete(&mut events);
        });
        if let Some(outcome) = events.completed() {
            on_complete.call(outcome);
        }
    };

    let skip = Callback::new(move |_: ()| {
        let mut events = RoundEvents::default();
        engine.update(|engine| {
            engine.skip(&mut events);
        });
        if let Some(outcome) = events.completed() {
            on_complete.call(outcome);
        }
    });

    let card = move |image: GameImage, item: MatchItem| {
        let class = move || {
            engine.with(|state| {
                let mut class = String::from("match-card");
                if state.held() == Some(item) {
                    class.push_str(" held");
                }
                if state.is_matched(item) && !state.is_submitted() {
                    class.push_str(" matched");
                }
                if let (true, MatchItem::Leaf(id)) = (state.is_submitted(), item) {
                    match state.result_for(id) {
                        MatchResult::Correct => class.push_str(" correct"),
                        MatchResult::Incorrect | MatchResult::Unanswered => {
                            class.push_str(" wrong")
                        }
                    }
                }
                class
            })
        };

        view! {
            <button class=class on:click=move |_| select(item)>
                <img src=image.url.clone() alt=image.name.clone()/>
            </button>
        }
    };

    if engine.with_untracked(MatchingEngine::is_empty) {
        return view! {
            <SkipCard
                title="Match the leaf to its tree"
                message="At least one leaf and tree pair is needed for this round."
                on_skip=skip
            />
        }
        .into_view();
    }

    let (leaves, trees) =
        engine.with_untracked(|state| (state.leaves().to_vec(), state.trees().to_vec()));

    view! {
        <section class="quiz-card">
            <p class="eyebrow">"Click a leaf, then its tree"</p>
            <div class="match-column">
                {leaves
                    .into_iter()
                    .map(|image| {
                        let item = MatchItem::Leaf(image.id);
                        card(image, item)
                    })
                    .collect_view()}
            </div>
            <div class="match-column">
                {trees
                    .into_iter()
                    .map(|image| {
                        let item = MatchItem::Tree(image.id);
                        card(image, item)
                    })
                    .collect_view()}
            </div>
            <Show
                when=move || engine.with(MatchingEngine::is_submitted)
                fallback=move || {
                    view! {
                        <button
                            class="primary"
                            disabled=move || !engine.with(MatchingEngine::can_submit)
                            on:click=move |_| {
                                engine.update(|engine| {
                                    engine.submit();
                                })
                            }
                        >
                            "Check matches"
                        </button>
                    }
                }
            >
                <ul class="review">
                    {move || {
                        engine
                            .with(MatchingEngine::review)
                            .into_iter()
                            .map(|row| {
                                let verdict = match row.result {
                                    MatchResult::Correct => "Correct!".to_string(),
                                    MatchResult::Incorrect | MatchResult::Unanswered => {
                                        format!(
                                            "You chose {}. The right tree is {}.",
                                            name_of(row.chosen_tree_id),
                                            name_of(Some(row.correct_tree_id)),
                                        )
                                    }
                                };
                                view! {
                                    <li>
                                        <Formatted text=name_of(Some(row.leaf_id))/>
                                        ": "
                                        {verdict}
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
                <button class="primary" on:click=finish>"See final score"</button>
            </Show>
        </section>
    }
    .into_view()
}

#[component]
fn EditorScreen(data: GameData, on_exit: Callback<Option<GameData>>) -> impl IntoView {
    let editor = create_rw_signal(DataEditor::new(data));
    let (notice, set_notice) = create_signal::<Option<Notice>>(None);

    let report = move |result: Result<(), crate::EditorError>| {
        if let Err(error) = result {
            set_notice.set(Some(Notice::Error(error.to_string())));
        }
    };

    let export = move |_| {
        let json = editor.with(|editor| editor.export_json());
        let result = json
            .map_err(|error| error.to_string())
            .and_then(|json| download_json(&json).map_err(|error| format!("{error:?}")));
        match result {
            Ok(()) => set_notice.set(Some(Notice::Info(format!(
                "Data downloaded as '{EXPORT_FILE_NAME}'."
            )))),
            Err(message) => set_notice.set(Some(Notice::Error(message))),
        }
    };

    let import = move |ev: ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        input.set_value("");

        spawn_local(async move {
            let text = wasm_bindgen_futures::JsFuture::from(file.text())
                .await
                .ok()
                .and_then(|value| value.as_string());
            let Some(json) = text else {
                set_notice.set(Some(Notice::Error("The file could not be read.".to_string())));
                return;
            };

            let mut outcome = Ok(());
            editor.update(|editor| outcome = editor.import_json(&json));
            match outcome {
                Ok(()) => set_notice.set(Some(Notice::Info("Data restored from file.".to_string()))),
                Err(error) => set_notice.set(Some(Notice::Error(error.to_string()))),
            }
        });
    };

    let questions = move || {
        editor
            .with(|editor| editor.data().questions.clone())
            .into_iter()
            .map(|question| {
                let id = question.id;
                view! {
                    <li class="editor-item">
                        <textarea
                            prop:value=question.question_text.clone()
                            on:change=move |ev| {
                                let text = event_target_value(&ev);
                                editor.update(|editor| report(editor.set_question_text(id, text)));
                            }
                        ></textarea>
                        {question
                            .options
                            .iter()
                            .enumerate()
                            .map(|(index, option)| {
                                view! {
                                    <label class="editor-option">
                                        <input
                                            type="radio"
                                            name=format!("question-{id}")
                                            prop:checked=option.is_correct
                                            on:change=move |_| {
                                                editor
                                                    .update(|editor| {
                                                        report(editor.set_question_correct_option(id, index))
                                                    })
                                            }
                                        />
                                        <input
                                            type="text"
                                            prop:value=option.text.clone()
                                            on:change=move |ev| {
                                                let text = event_target_value(&ev);
                                                editor
                                                    .update(|editor| {
                                                        report(editor.set_question_option_text(id, index, text))
                                                    })
                                            }
                                        />
                                    </label>
                                }
                            })
                            .collect_view()}
                        <button
                            class="pill"
                            on:click=move |_| editor.update(|editor| report(editor.remove_question(id)))
                        >
                            "Remove"
                        </button>
                    </li>
                }
            })
            .collect_view()
    };

    let images = move || {
        editor
            .with(|editor| editor.data().images.clone())
            .into_iter()
            .map(|image| {
                let id = image.id;
                let options = image.options.clone().unwrap_or_default();
                view! {
                    <li class="editor-item">
                        <span class="eyebrow">{image.kind.to_string()}</span>
                        <input
                            type="text"
                            prop:value=image.name.clone()
                            on:change=move |ev| {
                                let name = event_target_value(&ev);
                                editor.update(|editor| report(editor.set_image_name(id, name)));
                            }
                        />
                        <input
                            type="url"
                            prop:value=image.url.clone()
                            on:change=move |ev| {
                                let url = event_target_value(&ev);
                                editor.update(|editor| report(editor.set_image_url(id, url)));
                            }
                        />
                        {options
                            .into_iter()
                            .enumerate()
                            .map(|(index, option)| {
                                view! {
                                    <label class="editor-option">
                                        <input
                                            type="radio"
                                            name=format!("image-{id}")
                                            prop:checked=option.is_correct
                                            on:change=move |_| {
                                                editor
                                                    .update(|editor| {
                                                        report(editor.set_image_correct_option(id, index))
                                                    })
                                            }
                                        />
                                        <input
                                            type="text"
                                            prop:value=option.text
                                            on:change=move |ev| {
                                                let text = event_target_value(&ev);
                                                editor
                                                    .update(|editor| {
                                                        report(editor.set_image_option_text(id, index, text))
                                                    })
                                            }
                                        />
                                    </label>
                                }
                            })
                            .collect_view()}
                        <button
                            class="pill"
                            on:click=move |_| editor.update(|editor| report(editor.remove_image(id)))
                        >
                            "Remove"
                        </button>
                    </li>
                }
            })
            .collect_view()
    };

    let image_choices = move |kind: ImageKind, selected: u32| {
        editor
            .with(|editor| {
                editor
                    .data()
                    .images_of_kind(kind)
                    .map(|image| (image.id, image.name.clone()))
                    .collect::<Vec<_>>()
            })
            .into_iter()
            .map(|(id, name)| {
                view! { <option value=id.to_string() selected={id == selected}>{name}</option> }
            })
            .collect_view()
    };

    let pairs = move || {
        editor
            .with(|editor| editor.data().pairs.clone())
            .into_iter()
            .enumerate()
            .map(|(index, pair)| {
                let parse = |ev: &ev::Event| event_target_value(ev).parse::<u32>().ok();
                view! {
                    <li class="editor-item">
                        <select on:change=move |ev| {
                            if let Some(leaf_id) = parse(&ev) {
                                editor
                                    .update(|editor| {
                                        report(editor.set_pair(index, leaf_id, pair.tree_id))
                                    })
                            }
                        }>{image_choices(ImageKind::Leaf, pair.leaf_id)}</select>
                        <select on:change=move |ev| {
                            if let Some(tree_id) = parse(&ev) {
                                editor
                                    .update(|editor| {
                                        report(editor.set_pair(index, pair.leaf_id, tree_id))
                                    })
                            }
                        }>{image_choices(ImageKind::Tree, pair.tree_id)}</select>
                        <button
                            class="pill"
                            on:click=move |_| {
                                editor.update(|editor| report(editor.remove_pair(index).map(|_| ())))
                            }
                        >
                            "Remove"
                        </button>
                    </li>
                }
            })
            .collect_view()
    };

    let done = move |_| {
        let data = editor.with_untracked(|editor| editor.data().clone());
        match data.validate() {
            Ok(()) => on_exit.call(Some(data)),
            Err(error) => set_notice.set(Some(Notice::Error(error.to_string()))),
        }
    };

    view! {
        <section class="panel editor">
            <div class="header-actions">
                <button class="pill" on:click=export>"Save to file"</button>
                <label class="pill">
                    "Restore from file"
                    <input type="file" accept=".json" class="hidden" on:change=import/>
                </label>
                <button class="pill" on:click=move |_| on_exit.call(None)>"Discard changes"</button>
                <button class="primary" on:click=done>"Save and exit"</button>
            </div>
            {move || {
                notice
                    .get()
                    .map(|notice| match notice {
                        Notice::Info(message) => view! { <p class="notice">{message}</p> },
                        Notice::Error(message) => view! { <p class="notice error">{message}</p> },
                    })
            }}
            <h2>"Questions"</h2>
            <ul>{questions}</ul>
            <button class="pill" on:click=move |_| editor.update(|editor| {
                editor.add_question();
            })>"Add question"</button>
            <h2>"Images"</h2>
            <ul>{images}</ul>
            <div class="header-actions">
                {[ImageKind::Plant, ImageKind::Leaf, ImageKind::Tree]
                    .into_iter()
                    .map(|kind| {
                        view! {
                            <button class="pill" on:click=move |_| editor.update(|editor| {
                                editor.add_image(kind);
                            })>{format!("Add {kind}")}</button>
                        }
                    })
                    .collect_view()}
            </div>
            <h2>"Pairs"</h2>
            <ul>{pairs}</ul>
            <button class="pill" on:click=move |_| editor.update(|editor| report(editor.add_pair().map(|_| ())))>
                "Add pair"
            </button>
        </section>
    }
}

#[component]
fn EndScreen(summary: SessionSummary, on_restart: Callback<()>) -> impl IntoView {
    let earned_trophy = summary.earned_trophy;

    view! {
        <section class="panel">
            <p class="panel-title">"Game over!"</p>
            <Show when=move || earned_trophy>
                <p class="trophy">"🏆"</p>
            </Show>
            <p class="headline">{format!("{} / {}", summary.total_score, summary.total_possible)}</p>
            <progress max="100" value=summary.percentage()></progress>
            <div class="status-panel">
                {summary
                    .modes
                    .iter()
                    .map(|result| {
                        view! {
                            <div class="status-item">
                                <p class="label">{result.mode.label()}</p>
                                <p class="value">{format!("{} / {}", result.score, result.total)}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
            <button class="primary" on:click=move |_| on_restart.call(())>"Play again"</button>
        </section>
    }
}

#[component]
fn App() -> impl IntoView {
    let config = store_value(GameConfig::default());
    let controller = create_rw_signal(SessionController::new());
    let (confetti, set_confetti) = create_signal(false);
    let confetti_timer = store_value(None::<TimeoutHandle>);

    let url = config.with_value(|config| config.data_url.clone());
    spawn_local(async move {
        match fetch_game_data(&url).await {
            Ok(data) => controller.update(|controller| controller.data_loaded(data)),
            Err(message) => controller.update(|controller| controller.data_failed(message)),
        }
    });

    let dispatch = move |event: Event| {
        let mut refused = None;
        controller.update(|controller| {
            if let Err(error) = controller.dispatch(event) {
                refused = Some(error);
            }
        });
        if let Some(error) = refused {
            log::warn!("{error}");
        }
    };

    let celebrate = Callback::new(move |_: ()| {
        clear_timer(confetti_timer);
        set_confetti.set(true);
        let duration = config.with_value(GameConfig::confetti_duration);
        if let Ok(handle) = set_timeout_with_handle(move || set_confetti.set(false), duration) {
            confetti_timer.set_value(Some(handle));
        }
    });

    let screen = create_memo(move |_| {
        controller.with(|controller| {
            let loading = match controller.data_status() {
                DataStatus::Loading => Loading::Pending,
                DataStatus::Failed(_) => Loading::Failed,
                DataStatus::Ready(_) => Loading::Ready,
            };
            (loading, controller.game_state())
        })
    });

    let in_round = move || {
        matches!(
            screen.get().1,
            GameState::Quiz | GameState::ImageGuessing | GameState::Matching
        )
    };

    let body = move || {
        let (loading, game_state) = screen.get();
        match loading {
            Loading::Pending => {
                return view! {
                    <section class="placeholder-card">
                        <p class="lede">"Loading Flora Master..."</p>
                    </section>
                }
                .into_view();
            }
            Loading::Failed => {
                let message = controller.with_untracked(|controller| match controller.data_status() {
                    DataStatus::Failed(message) => message.clone(),
                    DataStatus::Loading | DataStatus::Ready(_) => String::new(),
                });
                return view! {
                    <section class="error-card">
                        <p class="eyebrow">"Could not load the game data"</p>
                        <p class="error-body">{message}</p>
                    </section>
                }
                .into_view();
            }
            Loading::Ready => {}
        }

        let Some(data) = controller.with_untracked(|controller| controller.data().cloned()) else {
            return ().into_view();
        };
        let config = config.get_value();

        match game_state {
            GameState::Intro => view! {
                <IntroScreen on_done=Callback::new(move |_| dispatch(Event::AnimationComplete))/>
            }
            .into_view(),
            GameState::Setup => view! {
                <SetupScreen
                    on_start=Callback::new(move |_| dispatch(Event::StartGame))
                    on_edit=Callback::new(move |_| dispatch(Event::EnterEditMode))
                />
            }
            .into_view(),
            GameState::Edit => view! {
                <EditorScreen
                    data=data
                    on_exit=Callback::new(move |edited| dispatch(Event::ExitEditMode(edited)))
                />
            }
            .into_view(),
            GameState::Quiz => view! {
                <QuizScreen
                    questions=data.questions
                    settle_delay=config.quiz_settle_delay()
                    on_correct=celebrate
                    on_complete=Callback::new(move |outcome| dispatch(Event::CompleteQuiz(outcome)))
                />
            }
            .into_view(),
            GameState::ImageGuessing => view! {
                <ImageGuessScreen
                    plants=data.plants_for_guessing()
                    settle_delay=config.image_settle_delay()
                    on_correct=celebrate
                    on_complete=Callback::new(move |outcome| {
                        dispatch(Event::CompleteImageGuessing(outcome))
                    })
                />
            }
            .into_view(),
            GameState::Matching => view! {
                <MatchingScreen
                    images=data.images
                    pairs=data.pairs
                    on_correct=celebrate
                    on_complete=Callback::new(move |outcome| {
                        dispatch(Event::CompleteMatching(outcome))
                    })
                />
            }
            .into_view(),
            GameState::End => {
                let summary = controller.with_untracked(|controller| {
                    SessionSummary::from_state(controller.state(), config.trophy_threshold)
                });
                view! {
                    <EndScreen
                        summary=summary
                        on_restart=Callback::new(move |_| dispatch(Event::Restart))
                    />
                }
                .into_view()
            }
        }
    };

    view! {
        <main class="page">
            <header class="page-header">
                <h1 class="headline">"Flora Master"</h1>
                <Show when=in_round>
                    <div class="running-score">
                        "Points: "
                        {move || controller.with(|controller| controller.state().running_score())}
                    </div>
                </Show>
            </header>
            <Show when=move || confetti.get()>
                <div class="confetti" aria-hidden="true"></div>
            </Show>
            {body}
        </main>
    }
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("starting Flora Master");
    mount_to_body(|| view! { <App/> });
}
