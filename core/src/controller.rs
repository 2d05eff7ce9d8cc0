//! One play session for today's puzzle.
//!
//! SEQUENCE on start (fixed):
//!   1. Select today's posting (no posting means no game).
//!   2. Load the stored games, or start from nothing if storage fails.
//!   3. Get or create today's GameState.
//!   4. Draw the redacted posting, the guess slots and the input.
//!
//! RULES:
//!   - The solution is never written to the surface while the game runs.
//!   - Invalid submissions change nothing and report nothing to the player.
//!   - Every accepted guess is saved before `submit` returns, unless the
//!     stored games could not be loaded. Then the session is memory-only
//!     and the stored blob is left as it was.

use crate::{
    clock::Clock,
    config::PostleConfig,
    error::PostleResult,
    game::{GameState, GameStatus, Transition},
    posting::{Posting, PostingFields},
    roster::{AuthorRoster, Suggestion},
    selector::PuzzleCollection,
    store::{GameBook, GameStore, Storage},
    types::DateKey,
    view::{render_game, render_posting, Surface},
};

pub struct GameController<S: Storage, V: Surface> {
    date:    DateKey,
    posting: Posting,
    roster:  AuthorRoster,
    config:  PostleConfig,
    store:   GameStore<S>,
    games:   GameBook,
    state:   GameState,
    surface: V,
    persist: bool,
}

impl<S: Storage, V: Surface> GameController<S, V> {
    pub fn start(
        mut surface: V,
        puzzles: &PuzzleCollection,
        roster: AuthorRoster,
        mut store: GameStore<S>,
        clock: &dyn Clock,
        config: &PostleConfig,
    ) -> PostleResult<Self> {
        let puzzle = puzzles.select_today(clock)?;
        let date = puzzle.date.to_string();
        let posting = puzzle.posting.clone();

        let (mut games, persist) = match store.load() {
            Ok(games) => (games, true),
            Err(e) => {
                log::error!("could not load stored games, progress will not survive a reload: {e}");
                (GameBook::default(), false)
            }
        };

        let state = match games.get(&date) {
            Some(stored) => {
                if stored.solution() != posting.author {
                    log::warn!("stored game for {date} has a different solution than today's posting");
                }
                stored.clone()
            }
            None => {
                let fresh = GameState::new(posting.author.clone(), config.max_guesses);
                games.insert(date.clone(), fresh.clone());
                fresh
            }
        };

        surface.guess_slots(state.max_guesses());
        render_posting(&mut surface, &posting.redacted());
        render_game(&mut surface, &state);

        log::info!(
            "started game for {date}: {} of {} guesses used, {:?}",
            state.guesses().len(),
            state.max_guesses(),
            state.status()
        );

        Ok(Self {
            date,
            posting,
            roster,
            config: config.clone(),
            store,
            games,
            state,
            surface,
            persist,
        })
    }

    /// Handle one submission from the input field.
    ///
    /// Ignored submissions return `Ok(Transition::Ignored(_))` and leave
    /// state and surface alone. If saving fails the guess still counts for
    /// this session and the storage error is returned.
    pub fn submit(&mut self, raw_input: &str) -> PostleResult<Transition> {
        let guess = raw_input.trim();
        let transition = self.state.submit_guess(guess, &self.roster);

        let next = match &transition {
            Transition::Ignored(reason) => {
                log::debug!("ignored guess {guess:?} for {}: {reason:?}", self.date);
                return Ok(transition);
            }
            Transition::Advanced(next) => next.clone(),
        };

        log::debug!(
            "guess {} of {} for {}: {:?}",
            next.guesses().len(),
            next.max_guesses(),
            self.date,
            next.status()
        );

        self.games.insert(self.date.clone(), next.clone());
        self.state = next;

        render_game(&mut self.surface, &self.state);

        if !self.persist {
            log::debug!("session for {} is memory-only, not saving", self.date);
            return Ok(transition);
        }
        if let Err(e) = self.store.save(&self.games) {
            log::error!("could not save game for {}: {e}", self.date);
            return Err(e);
        }
        Ok(transition)
    }

    /// Autocomplete candidates for the current input.
    pub fn suggestions(&self, fragment: &str) -> Vec<Suggestion> {
        self.roster.suggest(fragment, self.config.suggestion_limit)
    }

    /// The full, unredacted posting. Only available once the game is over.
    pub fn revealed_posting(&self) -> Option<PostingFields> {
        if self.status().is_terminal() {
            Some(PostingFields::from(&self.posting))
        } else {
            None
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    /// False when loading failed and nothing is written back this session.
    pub fn persists(&self) -> bool {
        self.persist
    }

    pub fn games(&self) -> &GameBook {
        &self.games
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    /// End the session and hand back the store, e.g. to start a new one.
    pub fn into_store(self) -> GameStore<S> {
        self.store
    }
}
