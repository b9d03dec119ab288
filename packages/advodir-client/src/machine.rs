//! Directory view state as an explicit state machine.
//!
//! [`DirectoryMachine::handle`] is the whole transition table: it takes one [`Event`], updates the
//! view state and returns the [`Effect`]s the driver must carry out (timers, aborts, fetches). It
//! performs no I/O, so every rule can be exercised without a clock or a server.

use std::time::Duration;

use advodir_domain::{Advocate, AdvocatePage, PageQuery, total_pages};

pub const PAGE_SIZE: u32 = 25;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
	/// Nothing loaded and nothing requested yet.
	Idle,
	/// Input changed; waiting for the quiet period to elapse.
	Debouncing,
	/// A request is in flight.
	Fetching,
	/// The latest request finished, successfully or not.
	Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
	Previous,
	Next,
	Goto(u32),
}

#[derive(Debug, Clone)]
pub enum Event {
	/// Initial load of the first page.
	Start,
	InputChanged(String),
	DebounceElapsed { generation: u64 },
	PageRequested(PageMove),
	Reset,
	ResponseArrived { request: RequestId, outcome: Result<AdvocatePage, String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
	/// Replace any pending debounce timer with one that fires `DebounceElapsed { generation }`.
	ScheduleDebounce { generation: u64, delay: Duration },
	/// Cancel the in-flight request. Its response must never be delivered.
	Abort { request: RequestId },
	Fetch { request: RequestId, query: PageQuery },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControls {
	pub current_page: u32,
	pub total_pages: u32,
	pub can_previous: bool,
	pub can_next: bool,
}

/// Read-only copy of the view state, published after every transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
	pub phase: Phase,
	pub search_term: String,
	pub debounced_term: String,
	pub current_page: u32,
	pub rows: Vec<Advocate>,
	pub total: u64,
	pub last_error: Option<String>,
	pub controls: PageControls,
}

#[derive(Debug)]
pub struct DirectoryMachine {
	page_size: u32,
	debounce: Duration,
	phase: Phase,
	search_term: String,
	debounced_term: String,
	current_page: u32,
	rows: Vec<Advocate>,
	total: u64,
	last_error: Option<String>,
	generation: u64,
	debounce_pending: bool,
	in_flight: Option<RequestId>,
	next_request: RequestId,
	loaded: bool,
}
impl DirectoryMachine {
	pub fn new(page_size: u32, debounce: Duration) -> Self {
		Self {
			page_size: page_size.max(1),
			debounce,
			phase: Phase::Idle,
			search_term: String::new(),
			debounced_term: String::new(),
			current_page: 0,
			rows: Vec::new(),
			total: 0,
			last_error: None,
			generation: 0,
			debounce_pending: false,
			in_flight: None,
			next_request: 1,
			loaded: false,
		}
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn in_flight(&self) -> Option<RequestId> {
		self.in_flight
	}

	pub fn handle(&mut self, event: Event) -> Vec<Effect> {
		match event {
			Event::Start => self.fetch(),
			Event::InputChanged(term) => self.input_changed(term),
			Event::Reset => self.input_changed(String::new()),
			Event::DebounceElapsed { generation } => self.debounce_elapsed(generation),
			Event::PageRequested(page_move) => self.page_requested(page_move),
			Event::ResponseArrived { request, outcome } => self.response_arrived(request, outcome),
		}
	}

	pub fn controls(&self) -> PageControls {
		let total_pages = total_pages(self.total, self.page_size);

		PageControls {
			current_page: self.current_page,
			total_pages,
			can_previous: self.current_page > 0,
			can_next: self.current_page.saturating_add(1) < total_pages,
		}
	}

	pub fn snapshot(&self) -> Snapshot {
		Snapshot {
			phase: self.phase,
			search_term: self.search_term.clone(),
			debounced_term: self.debounced_term.clone(),
			current_page: self.current_page,
			rows: self.rows.clone(),
			total: self.total,
			last_error: self.last_error.clone(),
			controls: self.controls(),
		}
	}

	fn input_changed(&mut self, term: String) -> Vec<Effect> {
		self.search_term = term;
		self.generation += 1;
		self.debounce_pending = true;
		self.phase = Phase::Debouncing;

		vec![Effect::ScheduleDebounce { generation: self.generation, delay: self.debounce }]
	}

	fn debounce_elapsed(&mut self, generation: u64) -> Vec<Effect> {
		// Only the latest scheduled timer counts.
		if !self.debounce_pending || generation != self.generation {
			return Vec::new();
		}

		self.debounce_pending = false;

		if self.search_term == self.debounced_term {
			self.phase = self.resting_phase();

			return Vec::new();
		}

		self.debounced_term = self.search_term.clone();
		self.current_page = 0;

		self.fetch()
	}

	fn page_requested(&mut self, page_move: PageMove) -> Vec<Effect> {
		let last = total_pages(self.total, self.page_size).saturating_sub(1);
		let target = match page_move {
			PageMove::Previous => self.current_page.saturating_sub(1),
			PageMove::Next => self.current_page.saturating_add(1),
			PageMove::Goto(page) => page,
		}
		.min(last);

		if target == self.current_page {
			return Vec::new();
		}

		self.current_page = target;

		self.fetch()
	}

	fn response_arrived(
		&mut self,
		request: RequestId,
		outcome: Result<AdvocatePage, String>,
	) -> Vec<Effect> {
		// A superseded response is dropped without touching the view.
		if self.in_flight != Some(request) {
			return Vec::new();
		}

		self.in_flight = None;
		self.loaded = true;

		match outcome {
			Ok(page) => {
				self.rows = page.data;
				self.total = page.total;
				self.last_error = None;
			},
			Err(message) => {
				self.last_error = Some(message);
			},
		}

		self.phase = if self.debounce_pending { Phase::Debouncing } else { Phase::Settled };

		Vec::new()
	}

	fn fetch(&mut self) -> Vec<Effect> {
		let mut effects = Vec::with_capacity(2);

		if let Some(previous) = self.in_flight.take() {
			effects.push(Effect::Abort { request: previous });
		}

		let request = self.next_request;

		self.next_request += 1;
		self.in_flight = Some(request);
		self.phase = Phase::Fetching;

		effects.push(Effect::Fetch {
			request,
			query: PageQuery::for_page(&self.debounced_term, self.current_page, self.page_size),
		});

		effects
	}

	fn resting_phase(&self) -> Phase {
		if self.in_flight.is_some() {
			Phase::Fetching
		} else if self.loaded {
			Phase::Settled
		} else {
			Phase::Idle
		}
	}
}
impl Default for DirectoryMachine {
	fn default() -> Self {
		Self::new(PAGE_SIZE, DEFAULT_DEBOUNCE)
	}
}
