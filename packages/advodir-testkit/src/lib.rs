mod error;

pub use error::{Error, Result};

use std::{env, future::Future, str::FromStr, thread};

use sqlx::{
	ConnectOptions, Connection, Executor, PgPool,
	postgres::{PgConnectOptions, PgConnection},
	types::Json,
};
use tokio::runtime::Builder;
use uuid::Uuid;

const ADMIN_DATABASES: [&str; 2] = ["postgres", "template1"];

pub const PG_DSN_ENV: &str = "ADVODIR_PG_DSN";

/// A throwaway database created for one test and dropped on cleanup (or on `Drop`).
pub struct TestDatabase {
	name: String,
	dsn: String,
	admin_options: PgConnectOptions,
	cleaned: bool,
}
impl TestDatabase {
	pub async fn new(base_dsn: &str) -> Result<Self> {
		let base_options: PgConnectOptions = PgConnectOptions::from_str(base_dsn)
			.map_err(|err| Error::Message(format!("{PG_DSN_ENV} is not a Postgres DSN: {err}.")))?;
		let (admin_options, mut admin_conn) = connect_admin(&base_options).await?;
		let name = format!("advodir_test_{}", Uuid::new_v4().simple());
		let create_sql = format!(r#"CREATE DATABASE "{name}""#);

		admin_conn
			.execute(create_sql.as_str())
			.await
			.map_err(|err| Error::Message(format!("Cannot create {name}: {err}.")))?;

		let dsn = base_options.clone().database(&name).to_url_lossy().to_string();

		Ok(Self { name, dsn, admin_options, cleaned: false })
	}

	pub fn dsn(&self) -> &str {
		&self.dsn
	}

	pub async fn cleanup(mut self) -> Result<()> {
		self.cleanup_inner().await
	}

	async fn cleanup_inner(&mut self) -> Result<()> {
		if self.cleaned {
			return Ok(());
		}

		cleanup_database(&self.name, &self.admin_options).await?;

		self.cleaned = true;

		Ok(())
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if self.cleaned {
			return;
		}

		let name = self.name.clone();
		let admin_options = self.admin_options.clone();
		let cleanup_thread = thread::spawn(move || {
			let runtime = match Builder::new_current_thread().enable_all().build() {
				Ok(runtime) => runtime,
				Err(err) => {
					eprintln!("Dropping {name} failed: {err}.");

					return;
				},
			};

			if let Err(err) = runtime.block_on(cleanup_database(&name, &admin_options)) {
				eprintln!("Dropping {name} failed: {err}.");
			}
		});
		if cleanup_thread.join().is_err() {
			eprintln!("Cleanup thread for {} panicked.", self.name);
		}
	}
}

/// Row values for seeding the `advocates` table in tests.
#[derive(Clone, Debug)]
pub struct AdvocateFixture {
	pub first_name: String,
	pub last_name: String,
	pub city: String,
	pub degree: String,
	pub specialties: Vec<String>,
	pub years_of_experience: i32,
	pub phone_number: i64,
}
impl AdvocateFixture {
	pub fn new(first_name: &str, last_name: &str) -> Self {
		Self {
			first_name: first_name.to_string(),
			last_name: last_name.to_string(),
			city: "Springfield".to_string(),
			degree: "MD".to_string(),
			specialties: Vec::new(),
			years_of_experience: 5,
			phone_number: 5_550_000_000,
		}
	}

	pub fn city(mut self, city: &str) -> Self {
		self.city = city.to_string();

		self
	}

	pub fn degree(mut self, degree: &str) -> Self {
		self.degree = degree.to_string();

		self
	}

	pub fn specialties(mut self, specialties: &[&str]) -> Self {
		self.specialties = specialties.iter().map(|value| value.to_string()).collect();

		self
	}
}

pub fn env_dsn() -> Option<String> {
	env::var(PG_DSN_ENV).ok()
}

pub async fn with_test_db<F, Fut, T>(base_dsn: &str, f: F) -> Result<T>
where
	F: FnOnce(&TestDatabase) -> Fut,
	Fut: Future<Output = Result<T>>,
{
	let db = TestDatabase::new(base_dsn).await?;
	let result = f(&db).await;
	let mut db = db;

	if let Err(err) = db.cleanup_inner().await {
		eprintln!("Dropping {} failed: {err}.", db.name);

		if result.is_ok() {
			return Err(err);
		}
	}

	result
}

/// Inserts `fixtures` in order and returns the generated ids.
pub async fn insert_advocates(pool: &PgPool, fixtures: &[AdvocateFixture]) -> Result<Vec<i32>> {
	let mut ids = Vec::with_capacity(fixtures.len());

	for fixture in fixtures {
		let id: i32 = sqlx::query_scalar(
			"\
INSERT INTO advocates (
	first_name,
	last_name,
	city,
	degree,
	specialties,
	years_of_experience,
	phone_number
)
VALUES ($1, $2, $3, $4, $5, $6, $7)
RETURNING id",
		)
		.bind(fixture.first_name.as_str())
		.bind(fixture.last_name.as_str())
		.bind(fixture.city.as_str())
		.bind(fixture.degree.as_str())
		.bind(Json(&fixture.specialties))
		.bind(fixture.years_of_experience)
		.bind(fixture.phone_number)
		.fetch_one(pool)
		.await?;

		ids.push(id);
	}

	Ok(ids)
}

async fn connect_admin(
	base_options: &PgConnectOptions,
) -> Result<(PgConnectOptions, PgConnection)> {
	let mut last_err = None;

	for database in ADMIN_DATABASES {
		let options = base_options.clone().database(database);

		match PgConnection::connect_with(&options).await {
			Ok(conn) => return Ok((options, conn)),
			Err(err) => {
				last_err = Some(err);
			},
		}
	}

	Err(Error::Message(format!(
		"None of {ADMIN_DATABASES:?} accepted a connection from {PG_DSN_ENV}: {last_err:?}."
	)))
}

async fn cleanup_database(name: &str, admin_options: &PgConnectOptions) -> Result<()> {
	let mut conn = PgConnection::connect_with(admin_options)
		.await
		.map_err(|err| Error::Message(format!("Cannot reach Postgres to drop {name}: {err}.")))?;
	let drop_sql = format!(r#"DROP DATABASE IF EXISTS "{name}""#);

	// Pools from the test may still hold sessions on the database.
	sqlx::query(
		"\
SELECT pg_terminate_backend(pid)
FROM pg_stat_activity
WHERE datname = $1 AND pid <> pg_backend_pid()",
	)
	.bind(name)
	.execute(&mut conn)
	.await
	.map_err(|err| Error::Message(format!("Cannot end sessions on {name}: {err}.")))?;
	sqlx::query(drop_sql.as_str())
		.execute(&mut conn)
		.await
		.map_err(|err| Error::Message(format!("Cannot drop {name}: {err}.")))?;

	Ok(())
}
