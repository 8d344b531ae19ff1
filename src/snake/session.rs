//! Session state machine: the pure per-tick transition and the session that schedules it.

use std::collections::VecDeque;
use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use crate::food::place_food;
use crate::game::{
    BoardSize, CELL_SIZE, Cell, Direction, INITIAL_SNAKE_SIZE, SessionConfig, next_head_position,
    same_position,
};

/// Everything that changes from one tick to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Head first, never empty while the session runs.
    pub snake: VecDeque<Cell>,
    pub food: Option<Cell>,
    pub direction: Direction,
    /// Turn buffered by input, applied on the next tick.
    pub pending_direction: Option<Direction>,
    pub score: u32,
}

impl SessionState {
    /// Initial snake laid out horizontally from the origin, heading right.
    pub fn new<R: Rng + ?Sized>(board: BoardSize, rng: &mut R) -> Self {
        let snake: VecDeque<Cell> = (0..INITIAL_SNAKE_SIZE as i32)
            .rev()
            .map(|part| Cell::new(part * CELL_SIZE, 0))
            .collect();
        let food = place_food(rng, board, &snake);

        SessionState {
            snake,
            food,
            direction: Direction::Right,
            pending_direction: None,
            score: 0,
        }
    }

    pub fn head(&self) -> Option<Cell> {
        self.snake.front().copied()
    }

    /// Buffers a 90-degree turn. Repeats and reversals are ignored.
    pub fn steer(&mut self, proposed: Direction) -> bool {
        if !self.direction.is_perpendicular(proposed) {
            return false;
        }
        self.pending_direction = Some(proposed);
        true
    }
}

/// Result of one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Continue(SessionState),
    /// The head ran into the body; only the score survives.
    Terminated { score: u32 },
}

/// Advances `state` by one cell.
pub fn tick<R: Rng + ?Sized>(mut state: SessionState, board: BoardSize, rng: &mut R) -> TickOutcome {
    // Apply the buffered turn
    if let Some(direction) = state.pending_direction.take() {
        state.direction = direction;
    }

    let Some(head) = state.head() else {
        return TickOutcome::Continue(state);
    };
    let next = next_head_position(head, state.direction, board);

    // Move the head; keep the tail only when food was eaten
    state.snake.push_front(next);
    if state.food.is_some_and(|food| same_position(&food, &next)) {
        state.score += 1;
        state.food = place_food(rng, board, &state.snake);
        debug!(
            "food eaten at ({}, {}), score {}",
            next.x, next.y, state.score
        );
        if state.food.is_none() {
            warn!("no free cell left for food");
        }
    } else {
        state.snake.pop_back();
    }

    // Self collision
    if state
        .snake
        .iter()
        .skip(1)
        .any(|part| same_position(part, &next))
    {
        return TickOutcome::Terminated { score: state.score };
    }

    TickOutcome::Continue(state)
}

/// Owned handle to the recurring tick. Once cancelled it never fires again.
#[derive(Debug, Default)]
pub struct TickSchedule {
    timer: Option<Timer>,
}

impl TickSchedule {
    pub fn every(interval: Duration) -> Self {
        TickSchedule {
            timer: Some(Timer::new(interval, TimerMode::Repeating)),
        }
    }

    /// Advances the schedule by `delta`. At most one tick is due per call,
    /// missed intervals are not caught up.
    pub fn due(&mut self, delta: Duration) -> bool {
        match self.timer.as_mut() {
            Some(timer) => timer.tick(delta).just_finished(),
            None => false,
        }
    }

    /// Returns false if the schedule was already cancelled.
    pub fn cancel(&mut self) -> bool {
        self.timer.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Running,
    Terminated,
}

/// One game from start to fatal collision.
#[derive(Resource, Debug)]
pub struct Session {
    config: SessionConfig,
    phase: SessionPhase,
    state: Option<SessionState>,
    schedule: TickSchedule,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Session {
            config,
            phase: SessionPhase::Idle,
            state: None,
            schedule: TickSchedule::default(),
        }
    }

    #[cfg(test)]
    pub fn running(config: SessionConfig, state: SessionState) -> Self {
        Session {
            config,
            phase: SessionPhase::Running,
            state: Some(state),
            schedule: TickSchedule::every(config.speed.interval()),
        }
    }

    /// Places the snake and the first food, then arms the tick schedule.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.phase != SessionPhase::Idle {
            return false;
        }

        self.state = Some(SessionState::new(self.config.board(), rng));
        self.schedule = TickSchedule::every(self.config.speed.interval());
        self.phase = SessionPhase::Running;
        info!(
            "session started on {}x{} cells at {} speed",
            self.config.width,
            self.config.height,
            self.config.speed.name()
        );
        true
    }

    pub fn steer(&mut self, direction: Direction) -> bool {
        match self.state.as_mut() {
            Some(state) if self.phase == SessionPhase::Running => state.steer(direction),
            _ => false,
        }
    }

    /// Runs the tick if one is due. Returns the final score exactly once,
    /// after the schedule has been cancelled.
    pub fn advance<R: Rng + ?Sized>(&mut self, delta: Duration, rng: &mut R) -> Option<u32> {
        if self.phase != SessionPhase::Running || !self.schedule.due(delta) {
            return None;
        }

        let state = self.state.take()?;
        match tick(state, self.config.board(), rng) {
            TickOutcome::Continue(state) => {
                self.state = Some(state);
                None
            }
            TickOutcome::Terminated { score } => {
                self.schedule.cancel();
                self.phase = SessionPhase::Terminated;
                info!("session over, final score {score}");
                Some(score)
            }
        }
    }

    /// Tears the session down without reporting a score.
    pub fn stop(&mut self) {
        if self.schedule.cancel() {
            info!("session stopped");
        }
        self.state = None;
        self.phase = SessionPhase::Terminated;
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.state.as_ref().map_or(0, |state| state.score)
    }

    pub fn is_ticking(&self) -> bool {
        self.schedule.is_armed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::SpeedTier;
    use rand::{SeedableRng, rngs::StdRng};

    fn cells(coords: &[(i32, i32)]) -> VecDeque<Cell> {
        coords.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    fn state(snake: &[(i32, i32)], food: Option<(i32, i32)>, direction: Direction) -> SessionState {
        SessionState {
            snake: cells(snake),
            food: food.map(|(x, y)| Cell::new(x, y)),
            direction,
            pending_direction: None,
            score: 0,
        }
    }

    fn board() -> BoardSize {
        BoardSize::from_cells(20, 20)
    }

    fn expect_continue(outcome: TickOutcome) -> SessionState {
        match outcome {
            TickOutcome::Continue(state) => state,
            TickOutcome::Terminated { score } => panic!("unexpected termination with score {score}"),
        }
    }

    #[test]
    fn initial_state_is_five_cells_heading_right() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = SessionState::new(board(), &mut rng);
        assert_eq!(
            state.snake,
            cells(&[(80, 0), (60, 0), (40, 0), (20, 0), (0, 0)])
        );
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.score, 0);
        let food = state.food.expect("food is placed");
        assert!(!state.snake.contains(&food));
    }

    #[test]
    fn first_tick_moves_right_and_drops_the_tail() {
        let mut rng = StdRng::seed_from_u64(1);
        let start = state(
            &[(80, 0), (60, 0), (40, 0), (20, 0), (0, 0)],
            Some((200, 200)),
            Direction::Right,
        );
        let next = expect_continue(tick(start, board(), &mut rng));
        assert_eq!(
            next.snake,
            cells(&[(100, 0), (80, 0), (60, 0), (40, 0), (20, 0)])
        );
        assert_eq!(next.score, 0);
        assert_eq!(next.food, Some(Cell::new(200, 200)));
    }

    #[test]
    fn head_wraps_through_the_left_edge() {
        let mut rng = StdRng::seed_from_u64(1);
        let start = state(&[(0, 0), (0, 20)], None, Direction::Left);
        let next = expect_continue(tick(start, board(), &mut rng));
        assert_eq!(next.head(), Some(Cell::new(380, 0)));
    }

    #[test]
    fn rejected_reversal_keeps_moving_right() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut start = state(&[(40, 0), (20, 0), (0, 0)], None, Direction::Right);
        assert!(!start.steer(Direction::Left));
        let next = expect_continue(tick(start, board(), &mut rng));
        assert_eq!(next.head(), Some(Cell::new(60, 0)));
        assert_eq!(next.direction, Direction::Right);
    }

    #[test]
    fn eating_grows_by_one_and_scores_one() {
        let mut rng = StdRng::seed_from_u64(5);
        let start = state(&[(40, 0), (20, 0), (0, 0)], Some((60, 0)), Direction::Right);
        let next = expect_continue(tick(start, board(), &mut rng));
        assert_eq!(next.snake, cells(&[(60, 0), (40, 0), (20, 0), (0, 0)]));
        assert_eq!(next.score, 1);
        let food = next.food.expect("a new food is placed");
        assert!(!next.snake.contains(&food));
    }

    #[test]
    fn plain_moves_preserve_length() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut current = state(
            &[(80, 40), (60, 40), (40, 40), (20, 40)],
            Some((300, 300)),
            Direction::Right,
        );
        for turn in [Direction::Down, Direction::Left, Direction::Down, Direction::Right] {
            current.steer(turn);
            current = expect_continue(tick(current, board(), &mut rng));
            assert_eq!(current.snake.len(), 4);
            assert_eq!(current.score, 0);
        }
    }

    #[test]
    fn score_tracks_growth() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut current = SessionState::new(board(), &mut rng);
        for _ in 0..400 {
            current = match tick(current, board(), &mut rng) {
                TickOutcome::Continue(state) => state,
                TickOutcome::Terminated { .. } => break,
            };
            assert_eq!(
                current.snake.len() - INITIAL_SNAKE_SIZE,
                current.score as usize
            );
        }
    }

    #[test]
    fn running_into_the_second_segment_terminates() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut start = state(&[(40, 0), (20, 0), (0, 0)], None, Direction::Right);
        start.score = 4;
        // Only reachable by forcing the direction past the steering check.
        start.direction = Direction::Left;
        assert_eq!(
            tick(start, board(), &mut rng),
            TickOutcome::Terminated { score: 4 }
        );
    }

    #[test]
    fn running_into_the_body_terminates() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut start = state(
            &[(40, 20), (40, 40), (20, 40), (20, 20), (20, 0), (40, 0)],
            None,
            Direction::Down,
        );
        start.direction = Direction::Up;
        assert!(start.steer(Direction::Left));
        assert_eq!(
            tick(start, board(), &mut rng),
            TickOutcome::Terminated { score: 0 }
        );
    }

    #[test]
    fn following_the_tail_is_safe() {
        let mut rng = StdRng::seed_from_u64(1);
        let start = state(
            &[(20, 0), (20, 20), (0, 20), (0, 0)],
            None,
            Direction::Left,
        );
        let next = expect_continue(tick(start, board(), &mut rng));
        assert_eq!(next.head(), Some(Cell::new(0, 0)));
    }

    #[test]
    fn empty_snake_tick_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(1);
        let start = state(&[], Some((20, 20)), Direction::Up);
        let next = expect_continue(tick(start.clone(), board(), &mut rng));
        assert_eq!(next, start);
    }

    #[test]
    fn steering_accepts_only_perpendicular_turns() {
        let mut current = state(&[(40, 0), (20, 0)], None, Direction::Right);
        assert!(!current.steer(Direction::Right));
        assert!(!current.steer(Direction::Left));
        assert_eq!(current.pending_direction, None);

        assert!(current.steer(Direction::Up));
        assert_eq!(current.pending_direction, Some(Direction::Up));
        assert!(current.steer(Direction::Down));
        assert_eq!(current.pending_direction, Some(Direction::Down));
        assert_eq!(current.direction, Direction::Right);
    }

    #[test]
    fn pending_turn_applies_on_the_next_tick() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut start = state(&[(40, 40), (20, 40)], None, Direction::Right);
        start.steer(Direction::Up);
        let next = expect_continue(tick(start, board(), &mut rng));
        assert_eq!(next.head(), Some(Cell::new(40, 20)));
        assert_eq!(next.direction, Direction::Up);
        assert_eq!(next.pending_direction, None);
    }

    #[test]
    fn schedule_fires_once_per_interval_without_catch_up() {
        let mut schedule = TickSchedule::every(Duration::from_millis(200));
        assert!(!schedule.due(Duration::from_millis(150)));
        assert!(schedule.due(Duration::from_millis(50)));
        assert!(schedule.due(Duration::from_millis(1000)));
        assert!(!schedule.due(Duration::from_millis(10)));
    }

    #[test]
    fn cancelled_schedule_never_fires() {
        let mut schedule = TickSchedule::every(Duration::from_millis(50));
        assert!(schedule.cancel());
        assert!(!schedule.cancel());
        assert!(!schedule.due(Duration::from_secs(10)));
        assert!(!schedule.is_armed());
    }

    #[test]
    fn session_starts_once() {
        let mut rng = StdRng::seed_from_u64(2);
        let config = SessionConfig {
            width: 10,
            height: 10,
            speed: SpeedTier::Slow,
        };
        let mut session = Session::new(config);
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(!session.steer(Direction::Up));
        assert_eq!(session.advance(Duration::from_secs(1), &mut rng), None);

        assert!(session.start(&mut rng));
        assert!(!session.start(&mut rng));
        assert_eq!(session.phase(), SessionPhase::Running);
        assert!(session.is_ticking());
        assert_eq!(session.state().map(|state| state.snake.len()), Some(INITIAL_SNAKE_SIZE));
    }

    #[test]
    fn session_ticks_at_the_speed_interval() {
        let mut rng = StdRng::seed_from_u64(2);
        let config = SessionConfig {
            width: 20,
            height: 20,
            speed: SpeedTier::Fast,
        };
        let mut session = Session::running(
            config,
            state(&[(80, 0), (60, 0)], Some((300, 300)), Direction::Right),
        );

        assert_eq!(session.advance(Duration::from_millis(60), &mut rng), None);
        assert_eq!(session.state().and_then(SessionState::head), Some(Cell::new(80, 0)));

        assert_eq!(session.advance(Duration::from_millis(40), &mut rng), None);
        assert_eq!(session.state().and_then(SessionState::head), Some(Cell::new(100, 0)));
    }

    #[test]
    fn session_reports_the_score_once_and_stops_ticking() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut doomed = state(&[(40, 0), (20, 0), (0, 0)], None, Direction::Left);
        doomed.score = 2;
        let mut session = Session::running(SessionConfig::default(), doomed);

        let interval = SpeedTier::Normal.interval();
        assert_eq!(session.advance(interval, &mut rng), Some(2));
        assert_eq!(session.phase(), SessionPhase::Terminated);
        assert!(!session.is_ticking());
        assert!(session.state().is_none());

        for _ in 0..5 {
            assert_eq!(session.advance(interval, &mut rng), None);
        }
    }

    #[test]
    fn stopping_cancels_without_a_score() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut session = Session::new(SessionConfig::default());
        session.start(&mut rng);
        session.stop();
        assert!(!session.is_ticking());
        assert_eq!(session.phase(), SessionPhase::Terminated);
        assert_eq!(session.advance(Duration::from_secs(1), &mut rng), None);
    }
}
