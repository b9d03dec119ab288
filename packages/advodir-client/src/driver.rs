use std::time::Duration;

use tokio::{
	sync::{mpsc, watch},
	task::JoinHandle,
	time,
};

use crate::{
	api::ApiClient,
	machine::{DirectoryMachine, Effect, Event, PageMove, RequestId, Snapshot},
};

/// Runs a [`DirectoryMachine`] on the tokio runtime: debounce timers become sleeping tasks,
/// fetches become request tasks, and aborts cancel those tasks.
///
/// Dropping the client stops the event loop and cancels any pending timer or request.
pub struct DirectoryClient {
	events: mpsc::UnboundedSender<Event>,
	snapshots: watch::Receiver<Snapshot>,
	task: JoinHandle<()>,
}
impl DirectoryClient {
	/// Starts the loop and issues the initial first-page load.
	pub fn spawn(api: ApiClient, page_size: u32, debounce: Duration) -> Self {
		let machine = DirectoryMachine::new(page_size, debounce);
		let (snapshot_tx, snapshots) = watch::channel(machine.snapshot());
		let (events, events_rx) = mpsc::unbounded_channel();
		let task = tokio::spawn(run(machine, api, events.clone(), events_rx, snapshot_tx));
		let client = Self { events, snapshots, task };

		client.send(Event::Start);

		client
	}

	pub fn set_search_term(&self, term: impl Into<String>) {
		self.send(Event::InputChanged(term.into()));
	}

	pub fn reset(&self) {
		self.send(Event::Reset);
	}

	pub fn next_page(&self) {
		self.send(Event::PageRequested(PageMove::Next));
	}

	pub fn previous_page(&self) {
		self.send(Event::PageRequested(PageMove::Previous));
	}

	pub fn goto_page(&self, page: u32) {
		self.send(Event::PageRequested(PageMove::Goto(page)));
	}

	pub fn snapshot(&self) -> Snapshot {
		self.snapshots.borrow().clone()
	}

	pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
		self.snapshots.clone()
	}

	fn send(&self, event: Event) {
		// The loop only stops when the client is dropped.
		let _ = self.events.send(event);
	}
}
impl Drop for DirectoryClient {
	fn drop(&mut self) {
		self.task.abort();
	}
}

/// Handles for the spawned side effects. Dropping it cancels both.
#[derive(Default)]
struct Outstanding {
	timer: Option<JoinHandle<()>>,
	fetch: Option<(RequestId, JoinHandle<()>)>,
}
impl Outstanding {
	fn replace_timer(&mut self, handle: JoinHandle<()>) {
		if let Some(previous) = self.timer.replace(handle) {
			previous.abort();
		}
	}

	fn abort_fetch(&mut self, request: RequestId) {
		if let Some((id, handle)) = self.fetch.take() {
			if id == request {
				handle.abort();
			} else {
				self.fetch = Some((id, handle));
			}
		}
	}
}
impl Drop for Outstanding {
	fn drop(&mut self) {
		if let Some(timer) = self.timer.take() {
			timer.abort();
		}
		if let Some((_, fetch)) = self.fetch.take() {
			fetch.abort();
		}
	}
}

async fn run(
	mut machine: DirectoryMachine,
	api: ApiClient,
	events: mpsc::UnboundedSender<Event>,
	mut events_rx: mpsc::UnboundedReceiver<Event>,
	snapshots: watch::Sender<Snapshot>,
) {
	let mut outstanding = Outstanding::default();

	while let Some(event) = events_rx.recv().await {
		for effect in machine.handle(event) {
			match effect {
				Effect::ScheduleDebounce { generation, delay } => {
					let events = events.clone();
					let handle = tokio::spawn(async move {
						time::sleep(delay).await;

						let _ = events.send(Event::DebounceElapsed { generation });
					});

					outstanding.replace_timer(handle);
				},
				Effect::Abort { request } => outstanding.abort_fetch(request),
				Effect::Fetch { request, query } => {
					let api = api.clone();
					let events = events.clone();
					let handle = tokio::spawn(async move {
						let outcome = api.fetch_page(&query).await.map_err(|err| err.to_string());

						let _ = events.send(Event::ResponseArrived { request, outcome });
					});

					outstanding.fetch = Some((request, handle));
				},
			}
		}

		snapshots.send_replace(machine.snapshot());
	}
}
