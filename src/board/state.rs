use crate::board::filter::{filter_coins, parse_row_limit, search_exceeds_limit};
use crate::board::view::{BoardView, DisplayRow};
use crate::market::coin::Coin;

pub const FETCH_FAILURE_ADVISORY: &str = "Failed to fetch data. Please try again later.";
pub const SEARCH_LENGTH_ADVISORY: &str = "Search input exceeds 30 characters.";

/// A change made through the input controls.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    Search(String),
    RowLimit(String),
}

/// Everything the board shows. Mutated only through the transitions below,
/// each of which leaves `filtered` consistent with the current criteria.
#[derive(Clone, Debug, Default)]
pub struct BoardState {
    snapshot: Vec<Coin>,
    filtered: Vec<Coin>,
    search: String,
    row_limit_input: String,
    row_limit: Option<usize>,
    fetch_failed: bool,
    search_too_long: bool,
}

impl BoardState {
    /// Replaces the snapshot wholesale and clears the fetch advisory.
    pub fn apply_snapshot(&mut self, coins: Vec<Coin>) {
        self.snapshot = coins;
        self.fetch_failed = false;
        self.refilter();
    }

    /// Leaves the previous snapshot displayed.
    pub fn record_fetch_failure(&mut self) {
        self.fetch_failed = true;
    }

    pub fn set_search(&mut self, search: String) {
        self.search_too_long = search_exceeds_limit(&search);
        self.search = search;
        self.refilter();
    }

    pub fn set_row_limit(&mut self, input: String) {
        self.row_limit = parse_row_limit(&input);
        self.row_limit_input = input;
        self.refilter();
    }

    pub fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Search(search) => self.set_search(search),
            InputEvent::RowLimit(input) => self.set_row_limit(input),
        }
    }

    fn refilter(&mut self) {
        self.filtered = filter_coins(&self.snapshot, &self.search, self.row_limit);
    }

    pub fn snapshot(&self) -> &[Coin] {
        &self.snapshot
    }

    pub fn filtered(&self) -> &[Coin] {
        &self.filtered
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn row_limit(&self) -> Option<usize> {
        self.row_limit
    }

    pub fn advisories(&self) -> Vec<&'static str> {
        let mut advisories = Vec::new();
        if self.fetch_failed {
            advisories.push(FETCH_FAILURE_ADVISORY);
        }
        if self.search_too_long {
            advisories.push(SEARCH_LENGTH_ADVISORY);
        }
        advisories
    }

    pub fn view(&self) -> BoardView {
        BoardView {
            rows: self.filtered.iter().map(DisplayRow::from).collect(),
            options: self.snapshot.iter().map(|coin| coin.name.clone()).collect(),
            search: self.search.clone(),
            row_limit_input: self.row_limit_input.clone(),
            advisories: self.advisories(),
        }
    }
}
