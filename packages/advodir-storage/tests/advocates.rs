use advodir_config::Postgres;
use advodir_storage::{db::Db, filter::AdvocateFilter, queries};
use advodir_testkit::{AdvocateFixture, TestDatabase};

async fn test_db() -> Option<(TestDatabase, Db)> {
	let Some(base_dsn) = advodir_testkit::env_dsn() else {
		eprintln!("Skipping advocate query tests; set ADVODIR_PG_DSN to run this test.");

		return None;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg =
		Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 2, acquire_timeout_ms: 5_000 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	Some((test_db, db))
}

fn sample_directory() -> Vec<AdvocateFixture> {
	vec![
		AdvocateFixture::new("Ann", "Lee").city("Boston").specialties(&["Oncology"]),
		AdvocateFixture::new("Bob", "Stone").city("Austin").degree("PhD").specialties(&[
			"Sleep medicine",
			"Trauma & PTSD",
		]),
		AdvocateFixture::new("Cara", "Onco").city("Denver").degree("MSW"),
		AdvocateFixture::new("Dan", "Ray").city("50% Off Town").specialties(&[]),
		AdvocateFixture::new("Eve", "Moss").city("Seattle").specialties(&["Pediatric oncology"]),
	]
}

fn expected_ids(fixtures: &[AdvocateFixture], ids: &[i32], term: &str) -> Vec<i32> {
	let needle = term.to_lowercase();

	fixtures
		.iter()
		.zip(ids)
		.filter(|(fixture, _)| {
			[&fixture.first_name, &fixture.last_name, &fixture.city, &fixture.degree]
				.into_iter()
				.chain(fixture.specialties.iter())
				.any(|value| value.to_lowercase().contains(&needle))
		})
		.map(|(_, id)| *id)
		.collect()
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ADVODIR_PG_DSN to run."]
async fn empty_table_returns_no_rows() {
	let Some((test_db, db)) = test_db().await else {
		return;
	};
	let slice = queries::search_advocates(&db, &AdvocateFilter::match_all(), 25, 0)
		.await
		.expect("Search failed.");

	assert!(slice.rows.is_empty());
	assert_eq!(slice.total, 0);

	db.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ADVODIR_PG_DSN to run."]
async fn specialty_match_is_case_insensitive() {
	let Some((test_db, db)) = test_db().await else {
		return;
	};
	let ids = advodir_testkit::insert_advocates(&db.pool, &[
		AdvocateFixture::new("Ann", "Lee").specialties(&["Oncology"]),
	])
	.await
	.expect("Failed to insert advocates.");
	let slice = queries::search_advocates(&db, &AdvocateFilter::contains("onco"), 25, 0)
		.await
		.expect("Search failed.");

	assert_eq!(slice.total, 1);
	assert_eq!(slice.rows.len(), 1);
	assert_eq!(slice.rows[0].id, ids[0]);
	assert_eq!(slice.rows[0].specialties.0, vec!["Oncology".to_string()]);

	db.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ADVODIR_PG_DSN to run."]
async fn predicate_matches_reference_for_each_term() {
	let Some((test_db, db)) = test_db().await else {
		return;
	};
	let fixtures = sample_directory();
	let ids = advodir_testkit::insert_advocates(&db.pool, &fixtures)
		.await
		.expect("Failed to insert advocates.");
	let terms =
		["onco", "ONCO", "phd", "austin", "ptsd", "e", "50%", "_", " ", " onco", "zzz-no-match"];

	for term in terms {
		let slice = queries::search_advocates(&db, &AdvocateFilter::contains(term), 25, 0)
			.await
			.expect("Search failed.");
		let got = slice.rows.iter().map(|row| row.id).collect::<Vec<_>>();
		let expected = expected_ids(&fixtures, &ids, term);

		assert_eq!(got, expected, "Unexpected rows for term {term:?}.");
		assert_eq!(slice.total, expected.len() as i64, "Unexpected total for term {term:?}.");
	}

	db.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ADVODIR_PG_DSN to run."]
async fn whitespace_in_term_is_matched_literally() {
	let Some((test_db, db)) = test_db().await else {
		return;
	};

	advodir_testkit::insert_advocates(&db.pool, &[
		AdvocateFixture::new("Ann", "Lee").city("Boston").specialties(&["Oncology"]),
		AdvocateFixture::new("Bob", "Van Dyke").city("Austin"),
	])
	.await
	.expect("Failed to insert advocates.");

	let leading = queries::search_advocates(&db, &AdvocateFilter::contains(" onco"), 25, 0)
		.await
		.expect("Search failed.");

	assert_eq!(leading.total, 0);
	assert!(leading.rows.is_empty());

	let space = queries::search_advocates(&db, &AdvocateFilter::contains(" "), 25, 0)
		.await
		.expect("Search failed.");

	assert_eq!(space.total, 1);
	assert_eq!(space.rows[0].first_name, "Bob");

	let spaces = queries::search_advocates(&db, &AdvocateFilter::contains("   "), 25, 0)
		.await
		.expect("Search failed.");

	assert_eq!(spaces.total, 0);

	db.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ADVODIR_PG_DSN to run."]
async fn wildcards_in_term_are_literal() {
	let Some((test_db, db)) = test_db().await else {
		return;
	};

	advodir_testkit::insert_advocates(&db.pool, &sample_directory())
		.await
		.expect("Failed to insert advocates.");

	let percent = queries::search_advocates(&db, &AdvocateFilter::contains("%"), 25, 0)
		.await
		.expect("Search failed.");

	assert_eq!(percent.total, 1);
	assert_eq!(percent.rows[0].first_name, "Dan");

	let underscore = queries::search_advocates(&db, &AdvocateFilter::contains("_"), 25, 0)
		.await
		.expect("Search failed.");

	assert_eq!(underscore.total, 0);

	db.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ADVODIR_PG_DSN to run."]
async fn pages_partition_the_filtered_set() {
	let Some((test_db, db)) = test_db().await else {
		return;
	};
	let fixtures = (0..30)
		.map(|idx| {
			AdvocateFixture::new(&format!("Match{idx}"), "Advocate").specialties(&["Cardiology"])
		})
		.collect::<Vec<_>>();
	let ids = advodir_testkit::insert_advocates(&db.pool, &fixtures)
		.await
		.expect("Failed to insert advocates.");
	let filter = AdvocateFilter::contains("cardio");
	let first = queries::search_advocates(&db, &filter, 25, 0).await.expect("Search failed.");
	let second = queries::search_advocates(&db, &filter, 25, 25).await.expect("Search failed.");
	let past_end = queries::search_advocates(&db, &filter, 25, 50).await.expect("Search failed.");

	assert_eq!((first.rows.len(), first.total), (25, 30));
	assert_eq!((second.rows.len(), second.total), (5, 30));
	assert_eq!((past_end.rows.len(), past_end.total), (0, 30));

	let mut seen = Vec::new();
	let mut offset = 0;

	loop {
		let page =
			queries::search_advocates(&db, &filter, 7, offset).await.expect("Search failed.");

		if page.rows.is_empty() {
			break;
		}

		seen.extend(page.rows.iter().map(|row| row.id));

		offset += 7;
	}

	assert_eq!(seen, ids);

	let again = queries::search_advocates(&db, &filter, 25, 0).await.expect("Search failed.");

	assert_eq!(
		again.rows.iter().map(|row| row.id).collect::<Vec<_>>(),
		first.rows.iter().map(|row| row.id).collect::<Vec<_>>()
	);

	db.close().await;
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ADVODIR_PG_DSN to run."]
async fn schema_bootstrap_is_idempotent_and_rejects_non_array_specialties() {
	let Some(base_dsn) = advodir_testkit::env_dsn() else {
		eprintln!("Skipping schema bootstrap test; set ADVODIR_PG_DSN to run this test.");

		return;
	};

	advodir_testkit::with_test_db(&base_dsn, |test_db| {
		let dsn = test_db.dsn().to_string();

		async move {
			let cfg = Postgres { dsn, pool_max_conns: 1, acquire_timeout_ms: 5_000 };
			let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

			db.ensure_schema().await.expect("Failed to ensure schema.");
			db.ensure_schema().await.expect("Second bootstrap must be a no-op.");

			let bad = sqlx::query(
				"\
INSERT INTO advocates (first_name, last_name, city, degree, specialties, years_of_experience, phone_number)
VALUES ('A', 'B', 'C', 'D', '{\"not\": \"array\"}'::jsonb, 1, 1)",
			)
			.execute(&db.pool)
			.await;

			assert!(bad.is_err(), "Expected CHECK constraint to reject a non-array value.");

			db.close().await;

			Ok(())
		}
	})
	.await
	.expect("Test database lifecycle failed.");
}
