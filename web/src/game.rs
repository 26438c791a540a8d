use crate::utils::*;
use clap::Args;
use flagfield_core as game;
use game::{InteractionMode, LevelCursor};
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCellState {
    Hidden,
    Revealed(u8),
    Flagged,
    TriggeredMine,
    Mine,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewGameState {
    Active,
    Won,
    Lost,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameSession {
    pub engine: game::PlayEngine,
    pub move_count: u32,
}

impl GameSession {
    fn new(engine: game::PlayEngine) -> Self {
        Self {
            engine,
            move_count: 0,
        }
    }

    fn view_state(&self) -> ViewGameState {
        use game::EngineState::*;
        match self.engine.state() {
            Active => ViewGameState::Active,
            Won => ViewGameState::Won,
            Lost => ViewGameState::Lost,
        }
    }

    /// Render adapter, reads the post-move board only.
    fn cell_state_at(&self, coords: game::Coord2) -> ViewCellState {
        use game::CellState::*;

        let cell = self.engine.cell_at(coords);
        match cell.state() {
            Hidden => ViewCellState::Hidden,
            Flagged => ViewCellState::Flagged,
            Revealed if self.engine.triggered_mine() == Some(coords) => {
                ViewCellState::TriggeredMine
            }
            Revealed if cell.is_mine() => ViewCellState::Mine,
            Revealed => ViewCellState::Revealed(cell.adjacent_mines()),
        }
    }

    /// Whether a click in `mode` could change the cell.
    fn can_interact_at(&self, coords: game::Coord2, mode: InteractionMode) -> bool {
        use InteractionMode::*;
        use ViewCellState::*;

        if self.engine.is_finished() {
            return false;
        }

        matches!(
            (mode, self.cell_state_at(coords)),
            (Reveal, Hidden) | (Flag, Hidden | Flagged) | (Unflag, Flagged)
        )
    }

    fn apply(&mut self, mode: InteractionMode, coords: game::Coord2) -> bool {
        match self.engine.act(mode, coords) {
            Ok(outcome) => {
                log::debug!("{:?} at {:?}: {:?}", mode, coords, outcome);
                if outcome.has_update() {
                    self.move_count = self.move_count.saturating_add(1);
                }
                outcome.has_update()
            }
            Err(err) => {
                log::debug!("{:?} at {:?} rejected: {}", mode, coords, err);
                false
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellClick(game::Coord2),
    SetMode(InteractionMode),
    Restart,
    NextLevel,
    PreviousLevel,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    x: game::Coord,
    y: game::Coord,
    cell_state: ViewCellState,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::Coord2>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    use ViewCellState::*;

    let CellProps {
        x,
        y,
        cell_state,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!(
        "cell",
        match cell_state {
            Hidden => classes!(),
            Revealed(count) => classes!("open", format!("num-{}", count)),
            Flagged => classes!("flag"),
            TriggeredMine => classes!("open", "mine", "oops"),
            Mine => classes!("open", "mine"),
        }
    );
    if locked {
        class.push("locked");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("({}, {}) click", x, y);
        callback.emit((x, y));
    });

    html! {
        <td {class} {onclick}/>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed for the first game instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Starting level, counted from 0
    #[arg(short, long, default_value_t = 0)]
    level: usize,
}

#[derive(Debug)]
pub(crate) struct GameView {
    level: LevelCursor,
    mode: InteractionMode,
    game: Option<GameSession>,
}

impl GameView {
    fn start_game(&mut self, seed: u64) {
        log::debug!("new game on level {} with seed {}", self.level.index(), seed);
        self.mode = InteractionMode::default();
        self.game = match self.level.new_engine(seed) {
            Ok(engine) => Some(GameSession::new(engine)),
            Err(err) => {
                log::error!("could not create game: {}", err);
                None
            }
        };
    }

    fn get_size(&self) -> game::Coord {
        self.game
            .as_ref()
            .map(|game| game.engine.size())
            .unwrap_or_else(|| self.level.current().size)
    }

    fn get_total_mines(&self) -> game::CellCount {
        self.game
            .as_ref()
            .map(|game| game.engine.total_mines())
            .unwrap_or_else(|| self.level.current().mines)
    }

    fn get_mines_left(&self) -> isize {
        self.game
            .as_ref()
            .map(|g| g.engine.mines_left())
            .unwrap_or(self.get_total_mines() as isize)
    }

    fn get_game_state(&self) -> ViewGameState {
        self.game
            .as_ref()
            .map_or(ViewGameState::Active, |game| game.view_state())
    }

    fn get_game_state_class(&self) -> Classes {
        classes!(match self.get_game_state() {
            ViewGameState::Active => "in-progress",
            ViewGameState::Won => "win",
            ViewGameState::Lost => "lose",
        })
    }

    fn view_banner(&self) -> Html {
        match self.get_game_state() {
            ViewGameState::Active => html! {},
            ViewGameState::Won if self.level.is_last() => {
                html! { <p class="banner win">{"All mines flagged, every level cleared!"}</p> }
            }
            ViewGameState::Won => html! { <p class="banner win">{"All mines flagged!"}</p> },
            ViewGameState::Lost => html! { <p class="banner lose">{"Boom! Game over."}</p> },
        }
    }

    fn view_mode_button(&self, ctx: &Context<Self>, mode: InteractionMode, label: &'static str) -> Html {
        let class = classes!("mode", (self.mode == mode).then_some("active"));
        let onclick = ctx.link().callback(move |_| Msg::SetMode(mode));
        html! {
            <button {class} {onclick}>{label}</button>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let level = LevelCursor::new(props.level).unwrap_or_else(|err| {
            log::error!("level {}: {}, starting from the first level", props.level, err);
            LevelCursor::default()
        });

        let mut view = Self {
            level,
            mode: InteractionMode::default(),
            game: None,
        };
        view.start_game(props.seed.unwrap_or_else(js_random_seed));
        view
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            CellClick(pos) => {
                let mode = self.mode;
                self.game
                    .as_mut()
                    .map_or(false, |game| game.apply(mode, pos))
            }
            SetMode(mode) => {
                log::debug!("mode: {:?}", mode);
                let changed = self.mode != mode;
                self.mode = mode;
                changed
            }
            Restart => {
                self.start_game(js_random_seed());
                true
            }
            NextLevel => {
                if self.level.next() {
                    self.start_game(js_random_seed());
                    true
                } else {
                    false
                }
            }
            PreviousLevel => {
                if self.level.previous() {
                    self.start_game(js_random_seed());
                    true
                } else {
                    false
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let size = self.get_size();
        let game_state_class = self.get_game_state_class();
        let is_playable = matches!(self.get_game_state(), ViewGameState::Active);
        let level_label = format!("Level {}/{}", self.level.index() + 1, game::LEVELS.len());
        let total_mines = format!("Mines: {}", self.get_total_mines());
        let mines_left = format!("Flags left: {}", self.get_mines_left());

        let cb_restart = ctx.link().callback(|_| Restart);
        let cb_previous = ctx.link().callback(|_| PreviousLevel);
        let cb_next = ctx.link().callback(|_| NextLevel);

        html! {
            <div class="flagfield" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <nav>
                    <button onclick={cb_previous} disabled={self.level.index() == 0}>{"‹"}</button>
                    <span>{level_label}</span>
                    <button onclick={cb_next} disabled={self.level.is_last()}>{"›"}</button>
                </nav>
                <nav>
                    <aside>{total_mines}</aside>
                    <span><button class={game_state_class} onclick={cb_restart}/></span>
                    <aside>{mines_left}</aside>
                </nav>
                <nav>
                    {self.view_mode_button(ctx, InteractionMode::Reveal, "Reveal")}
                    {self.view_mode_button(ctx, InteractionMode::Flag, "Flag")}
                    {self.view_mode_button(ctx, InteractionMode::Unflag, "Unflag")}
                </nav>
                <table class={is_playable.then_some("playable")}>
                    {
                        for (0..size).map(|y| html! {
                            <tr>
                                {
                                    for (0..size).map(|x| {
                                        let pos = (x, y);
                                        let cell_state = self
                                            .game
                                            .as_ref()
                                            .map_or(ViewCellState::Hidden, |game| game.cell_state_at(pos));
                                        let locked = self
                                            .game
                                            .as_ref()
                                            .map_or(true, |game| !game.can_interact_at(pos, self.mode));
                                        let callback = ctx.link().callback(Msg::CellClick);
                                        html! {
                                            <CellView {x} {y} {cell_state} {callback} {locked}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                {self.view_banner()}
            </div>
        }
    }
}
