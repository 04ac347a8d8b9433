use chrono::prelude::*;
use gloo::timers::callback::{Interval, Timeout};
use memorama_core as game;
use memorama_core::FeedbackSink;
use yew::prelude::*;

use crate::audio::WebAudioFeedback;
use crate::utils::*;

/// Extra reveal time after a mismatch, on top of the difficulty's
/// flipped duration, so the player can memorize the wrong pair.
const MISMATCH_EXTRA_MS: u32 = 400;

/// Pause before the first card of a pair is narrated.
const NARRATION_DELAY_MS: u32 = 300;

fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap()
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCardState {
    FaceDown,
    FaceUp(game::FlowerId),
    Matched(game::FlowerId),
}

impl ViewCardState {
    const fn is_face_up(self) -> bool {
        matches!(self, Self::FaceUp(_) | Self::Matched(_))
    }
}

/// One game from difficulty selection to win: the engine plus the session
/// clock. The tab owns it; nothing is persisted.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameSession {
    pub engine: game::MatchEngine,
    pub difficulty: game::Difficulty,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl GameSession {
    fn new(difficulty: game::Difficulty, engine: game::MatchEngine) -> Self {
        Self {
            engine,
            difficulty,
            started_at: None,
            ended_at: None,
        }
    }

    /// Seconds since the first accepted flip, frozen once the game is won.
    fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    fn mark_started(&mut self, now: DateTime<Utc>) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    fn mark_finished(&mut self, now: DateTime<Utc>) {
        if self.engine.is_won() && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
    }

    fn card_state_at(&self, index: game::CardIndex) -> ViewCardState {
        let card = self.engine.card_at(index);
        if card.is_matched {
            ViewCardState::Matched(card.flower_id)
        } else if self.engine.is_face_up(index) {
            ViewCardState::FaceUp(card.flower_id)
        } else {
            ViewCardState::FaceDown
        }
    }

    fn progress_percent(&self) -> u32 {
        let pairs = u32::from(self.engine.pair_count());
        if pairs == 0 {
            return 0;
        }
        u32::from(self.engine.matches()) * 100 / pairs
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    SelectDifficulty(game::Difficulty),
    FlipCard(game::CardIndex),
    ResolvePair,
    GetHint,
    ToggleNarration,
    DismissInstructions,
    UpdateTime,
    Reset,
}

#[derive(Properties, Clone, Debug, PartialEq, Default)]
pub(crate) struct GameProps {
    /// Forced deck seed for the first game; random when absent.
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: game::CardIndex,
    state: ViewCardState,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CardIndex>,
}

#[function_component(CardView)]
fn card_view(props: &CardProps) -> Html {
    let CardProps {
        index,
        state,
        locked,
        callback,
    } = props.clone();

    let flower = match state {
        ViewCardState::FaceDown => None,
        ViewCardState::FaceUp(id) | ViewCardState::Matched(id) => game::flower_by_id(id),
    };

    let class = classes!(
        "card",
        state.is_face_up().then_some("flipped"),
        matches!(state, ViewCardState::Matched(_)).then_some("matched"),
    );

    let aria_label = match flower {
        Some(flower) => format!("Carta {}: {}", index + 1, flower.name),
        None => format!("Carta {}", index + 1),
    };

    let onclick = Callback::from(move |_: MouseEvent| callback.emit(index));

    html! {
        <button
            {class}
            {onclick}
            disabled={locked}
            aria-label={aria_label}
            aria-pressed={state.is_face_up().to_string()}
        >
            { flower.map_or("?", |flower| flower.emoji) }
        </button>
    }
}

#[derive(Properties, PartialEq)]
struct InstructionsProps {
    onclose: Callback<()>,
}

const INSTRUCTIONS: &[(&str, &str, &str)] = &[
    (
        "🎯",
        "Cómo Jugar",
        "Este es un juego de memoria. Tu objetivo es encontrar parejas de flores.",
    ),
    (
        "🖱️",
        "Haz Clic en las Cartas",
        "Haz clic en cualquier carta para voltearla y ver la flor que contiene.",
    ),
    (
        "🌸",
        "Encuentra Parejas",
        "Intenta encontrar dos cartas con la misma flor. Si coinciden, permanecerán boca arriba.",
    ),
    (
        "⏱️",
        "Tómate tu Tiempo",
        "No hay prisa. Puedes jugar a tu propio ritmo. Este juego es para divertirse y ejercitar \
         tu memoria.",
    ),
];

#[function_component(InstructionsView)]
fn instructions_view(props: &InstructionsProps) -> Html {
    let step = use_state(|| 0usize);
    let (icon, title, description) = INSTRUCTIONS[*step];
    let last_step = INSTRUCTIONS.len() - 1;

    let on_back = {
        let step = step.clone();
        Callback::from(move |_: MouseEvent| step.set(step.saturating_sub(1)))
    };
    let on_next = {
        let step = step.clone();
        Callback::from(move |_: MouseEvent| step.set(*step + 1))
    };
    let on_close = {
        let onclose = props.onclose.clone();
        Callback::from(move |_: MouseEvent| onclose.emit(()))
    };

    html! {
        <Modal>
            <div class="overlay instructions">
                <div class="panel">
                    <div class="icon">{icon}</div>
                    <h2>{title}</h2>
                    <p>{description}</p>
                    <div class="progress-dots">
                        {
                            for (0..INSTRUCTIONS.len()).map(|dot| html! {
                                <span class={classes!("dot", (dot == *step).then_some("current"))}/>
                            })
                        }
                    </div>
                    <footer>
                        if *step > 0 {
                            <button onclick={on_back}>{"Atrás"}</button>
                        }
                        if *step < last_step {
                            <button onclick={on_next}>{"Siguiente"}</button>
                        } else {
                            <button onclick={on_close}>{"Empezar a Jugar"}</button>
                        }
                    </footer>
                </div>
            </div>
        </Modal>
    }
}

pub(crate) struct GameView {
    session: Option<GameSession>,
    seed: u64,
    narration_enabled: bool,
    show_instructions: bool,
    prev_time: u32,
    feedback: WebAudioFeedback,
    unlocked_rewards: game::UnlockedRewards,
    pending_resolve: Option<Timeout>,
    pending_narration: Option<Timeout>,
    _tick_interval: Interval,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(1000, move || link.send_message(Msg::UpdateTime))
    }

    fn get_time(&self) -> u32 {
        self.session
            .as_ref()
            .map(|session| session.elapsed_secs(utc_now()))
            .unwrap_or(0)
    }

    fn start_game(&mut self, difficulty: game::Difficulty) -> bool {
        use game::DeckGenerator;

        let deck = game::RandomDeckGenerator::new(self.seed).generate(difficulty.settings());
        let engine = game::MatchEngine::new(deck);
        log::info!("new {:?} game, {} cards", difficulty, engine.deck_size());

        self.session = Some(GameSession::new(difficulty, engine));
        self.prev_time = 0;
        self.feedback.play_game_start();
        true
    }

    fn flip_card(&mut self, ctx: &Context<Self>, index: game::CardIndex) -> bool {
        let narration_enabled = self.narration_enabled;
        let feedback = self.feedback;
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        match session.engine.flip_card(index) {
            Err(err) => {
                log::warn!("rejected flip at {}: {}", index, err);
                false
            }
            Ok(game::FlipOutcome::NoChange) => false,
            Ok(game::FlipOutcome::FirstRevealed { flower }) => {
                session.mark_started(utc_now());
                feedback.play_flip();

                if narration_enabled {
                    if let Some(flower) = game::flower_by_id(flower) {
                        let name = flower.name;
                        self.pending_narration = Some(Timeout::new(NARRATION_DELAY_MS, move || {
                            feedback.narrate(name);
                        }));
                    }
                }
                true
            }
            Ok(game::FlipOutcome::PairRevealed { matched }) => {
                session.mark_started(utc_now());
                feedback.play_flip();

                let duration = session.difficulty.settings().flipped_duration_ms;
                let delay = if matched {
                    feedback.play_success();
                    duration
                } else {
                    feedback.play_fail();
                    duration + MISMATCH_EXTRA_MS
                };

                let link = ctx.link().clone();
                self.pending_resolve = Some(Timeout::new(delay, move || {
                    link.send_message(Msg::ResolvePair);
                }));
                true
            }
        }
    }

    fn resolve_pair(&mut self) -> bool {
        self.pending_resolve = None;
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        match session.engine.resolve_pending() {
            game::ResolveOutcome::NoChange => false,
            game::ResolveOutcome::Mismatched => true,
            game::ResolveOutcome::Matched { flower } => {
                self.narrate_match(flower);
                true
            }
            game::ResolveOutcome::Won { flower } => {
                session.mark_finished(utc_now());
                log::info!("game won in {} moves", session.engine.moves());
                self.narrate_match(flower);
                self.feedback.play_game_won();
                true
            }
        }
    }

    fn narrate_match(&self, flower: game::FlowerId) {
        if !self.narration_enabled {
            return;
        }
        if let Some(flower) = game::flower_by_id(flower) {
            self.feedback
                .narrate(&format!("Excelente, encontraste {}", flower.name));
        }
    }

    fn get_hint(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        match session.engine.hint() {
            game::HintOutcome::NoChange => false,
            game::HintOutcome::Suggest { flower } => {
                if let Some(flower) = game::flower_by_id(flower) {
                    self.feedback.narrate(&format!("Busca dos {}s", flower.name));
                }
                true
            }
        }
    }

    fn view_difficulty_selector(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="difficulty-select">
                <header>
                    <h1>{"Memorama Flores"}</h1>
                    <p>{"Elige tu nivel de dificultad"}</p>
                    <p>{"Empareja todas las flores para ganar"}</p>
                </header>
                <nav>
                    {
                        for game::Difficulty::ALL.into_iter().map(|difficulty| {
                            let settings = difficulty.settings();
                            let onclick = ctx
                                .link()
                                .callback(move |_: MouseEvent| Msg::SelectDifficulty(difficulty));
                            let aria_label = format!(
                                "Nivel {} - {} cartas",
                                difficulty.label(),
                                settings.card_count
                            );
                            html! {
                                <button {onclick} aria-label={aria_label} title={settings.description}>
                                    { format!("{} ({} cartas)", difficulty.label(), settings.card_count) }
                                </button>
                            }
                        })
                    }
                </nav>
            </div>
        }
    }

    fn view_timer(&self, session: &GameSession) -> Html {
        html! {
            <section class="timer">
                <span>{"Tiempo Transcurrido"}</span>
                <strong>{ format_time(session.elapsed_secs(utc_now())) }</strong>
            </section>
        }
    }

    fn view_hints_panel(&self, ctx: &Context<Self>, session: &GameSession) -> Html {
        let narration_label = if self.narration_enabled {
            "🔊 Narración: Activada"
        } else {
            "🔊 Narración: Desactivada"
        };
        let narration_aria = if self.narration_enabled {
            "Desactivar narración de flores"
        } else {
            "Activar narración de flores"
        };
        let cb_narration = ctx.link().callback(|_: MouseEvent| Msg::ToggleNarration);
        let cb_hint = ctx.link().callback(|_: MouseEvent| Msg::GetHint);

        html! {
            <section class="hints">
                <button onclick={cb_narration} aria-label={narration_aria}>
                    {narration_label}
                </button>
                <button onclick={cb_hint} aria-label="Obtener una pista verbal">
                    {
                        format!(
                            "💡 Pista ({} de {})",
                            session.engine.hints_used(),
                            session.difficulty.settings().hint_allowance
                        )
                    }
                </button>
                <p>{"Usa las pistas para estimular tu memoria y lenguaje"}</p>
            </section>
        }
    }

    fn view_stats(&self, session: &GameSession) -> Html {
        let engine = &session.engine;
        html! {
            <section class="stats">
                <div class="stat">
                    <span>{"Parejas Encontradas"}</span>
                    <strong>{ format!("{}/{}", engine.matches(), engine.pair_count()) }</strong>
                </div>
                <div class="stat">
                    <span>{"Movimientos"}</span>
                    <strong>{ engine.moves() }</strong>
                </div>
                <div class="stat">
                    <span>{"Progreso"}</span>
                    <strong>{ format!("{}%", session.progress_percent()) }</strong>
                </div>
            </section>
        }
    }

    fn view_board(&self, ctx: &Context<Self>, session: &GameSession) -> Html {
        let engine = &session.engine;
        let columns = if engine.deck_size() <= 4 { 2 } else { 4 };
        let pair_up = engine.flipped_indices().len() == 2;

        html! {
            <section class={classes!("board", format!("cols-{}", columns))}>
                {
                    for (0..engine.deck_size()).map(|index| {
                        let state = session.card_state_at(index);
                        let locked = (engine.card_at(index).is_matched || pair_up)
                            && !state.is_face_up();
                        let callback = ctx.link().callback(Msg::FlipCard);
                        html! {
                            <CardView {index} {state} {locked} {callback}/>
                        }
                    })
                }
            </section>
        }
    }

    fn view_rewards_gallery(&self) -> Html {
        html! {
            <div class="rewards">
                <h3>{"Recompensas Desbloqueadas"}</h3>
                <p>
                    { format!("Recompensa {} de {}", self.unlocked_rewards.count(), game::REWARDS.len()) }
                </p>
                <ul>
                    {
                        for game::REWARDS.iter().map(|reward| {
                            let locked = !self.unlocked_rewards.is_unlocked(reward.id);
                            html! {
                                <li class={classes!("reward", locked.then_some("locked"))}>
                                    <span class="icon">{reward.icon}</span>
                                    <span class="title">{reward.title}</span>
                                </li>
                            }
                        })
                    }
                </ul>
            </div>
        }
    }

    fn view_win_overlay(&self, ctx: &Context<Self>, session: &GameSession) -> Html {
        let engine = &session.engine;
        let elapsed = session.elapsed_secs(utc_now());
        let rating = game::difficulty_rating(session.difficulty, engine.moves(), elapsed);
        let cb_play_again = ctx.link().callback(|_: MouseEvent| Msg::Reset);

        html! {
            <Modal>
                <div class="overlay win">
                    <div class="panel">
                        <h2>{"¡Ganaste!"}</h2>
                        <p>{ format!("Completaste el juego en {} movimientos", engine.moves()) }</p>
                        <p>{ format!("Tiempo total: {}", format_time(elapsed)) }</p>
                        <p>{ format!("Pistas utilizadas: {}", engine.hints_used()) }</p>
                        <p class="rating-stars">{ ("⭐").repeat(rating.stars.into()) }</p>
                        <p class="rating-label"><strong>{rating.label}</strong></p>
                        <p class="rating-message">{rating.message}</p>
                        { self.view_rewards_gallery() }
                        <button onclick={cb_play_again}>{"Jugar de Nuevo"}</button>
                    </div>
                </div>
            </Modal>
        }
    }

    fn view_game(&self, ctx: &Context<Self>, session: &GameSession) -> Html {
        let cb_reset = ctx.link().callback(|_: MouseEvent| Msg::Reset);
        let cb_dismiss = ctx.link().callback(|_| Msg::DismissInstructions);

        html! {
            <>
                <header class="game-header">
                    <h1>{"Memorama Flores"}</h1>
                    <button onclick={cb_reset} aria-label="Volver al menú principal">
                        {"Menú"}
                    </button>
                </header>
                if self.show_instructions {
                    <InstructionsView onclose={cb_dismiss}/>
                }
                { self.view_timer(session) }
                { self.view_hints_panel(ctx, session) }
                { self.view_stats(session) }
                { self.view_board(ctx, session) }
                if session.engine.is_won() {
                    { self.view_win_overlay(ctx, session) }
                }
            </>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            session: None,
            seed: ctx.props().seed.unwrap_or_else(js_random_seed),
            narration_enabled: true,
            show_instructions: true,
            prev_time: 0,
            feedback: WebAudioFeedback,
            unlocked_rewards: game::UnlockedRewards::new(),
            pending_resolve: None,
            pending_narration: None,
            _tick_interval: GameView::create_timer(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            SelectDifficulty(difficulty) => self.start_game(difficulty),
            FlipCard(index) => self.flip_card(ctx, index),
            ResolvePair => self.resolve_pair(),
            GetHint => self.get_hint(),
            ToggleNarration => {
                self.narration_enabled = !self.narration_enabled;
                if !self.narration_enabled {
                    // dropping the handle cancels the scheduled narration
                    self.pending_narration = None;
                }
                true
            }
            DismissInstructions => {
                self.show_instructions = false;
                true
            }
            UpdateTime => {
                let time = self.get_time();
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
            Reset => {
                self.session = None;
                self.show_instructions = true;
                self.pending_resolve = None;
                self.pending_narration = None;
                self.prev_time = 0;
                self.seed = js_random_seed();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="memorama">
                {
                    match &self.session {
                        None => self.view_difficulty_selector(ctx),
                        Some(session) => self.view_game(ctx, session),
                    }
                }
            </div>
        }
    }
}
