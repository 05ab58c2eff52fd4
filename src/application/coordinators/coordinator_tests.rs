// src/application/coordinators/coordinator_tests.rs
//
// Coordinator Tests
//
// Coordinators run against a real AppState (SQLite in a temp directory)
// with a mocked catalog.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use tokio::sync::watch;

    use crate::application::coordinators::QueryState;
    use crate::application::error_handling::ErrorType;
    use crate::application::AppState;
    use crate::config::AppConfig;
    use crate::domain::{Category, Movie};
    use crate::error::AppError;
    use crate::integrations::catalog_api::MockCatalogApi;
    use crate::integrations::{GenreDto, MovieDetailsDto, MovieItemDto};

    const WAIT: Duration = Duration::from_secs(5);

    fn item(id: i64, title: &str) -> MovieItemDto {
        MovieItemDto {
            id,
            title: title.to_string(),
            poster_path: None,
            release_date: Some("2022-03-01".to_string()),
            vote_average: 7.8,
        }
    }

    fn details_dto(id: i64) -> MovieDetailsDto {
        MovieDetailsDto {
            id,
            title: "The Batman".to_string(),
            poster_path: None,
            backdrop_path: None,
            tagline: Some("Unmask the truth".to_string()),
            release_date: Some("2022-03-01".to_string()),
            vote_average: 7.7,
            vote_count: 9000,
            overview: None,
            genres: vec![GenreDto {
                id: 80,
                name: "Crime".to_string(),
            }],
        }
    }

    fn app(api: MockCatalogApi) -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::with_path("test-key", dir.path().join("movieshelf.db")).unwrap();
        config.search_debounce = Duration::from_millis(50);
        let state = AppState::with_catalog(config, Arc::new(api)).unwrap();
        (dir, state)
    }

    async fn settle<T: Clone>(
        rx: &mut watch::Receiver<QueryState<T>>,
        done: impl Fn(&QueryState<T>) -> bool,
    ) -> QueryState<T> {
        tokio::time::timeout(WAIT, rx.wait_for(|s| done(s)))
            .await
            .expect("coordinator never settled")
            .expect("coordinator dropped")
            .clone()
    }

    fn titles(state: &QueryState<Vec<Movie>>) -> Vec<String> {
        state
            .value()
            .map(|movies| movies.iter().map(|m| m.title.clone()).collect())
            .unwrap_or_default()
    }

    // ========================================================================
    // HOME / CATEGORY FEEDS
    // ========================================================================

    #[tokio::test]
    async fn test_home_start_refreshes_every_tab() {
        let mut api = MockCatalogApi::new();
        api.expect_list_movies().times(4).returning(|category| match category {
            Category::Popular => Ok(vec![item(1, "Alien"), item(2, "Heat")]),
            Category::TopRated => Err(AppError::RemoteUnavailable("timeout".to_string())),
            _ => Ok(Vec::new()),
        });
        let (_dir, state) = app(api);
        let home = state.home();

        let outcomes = home.start().await;

        assert_eq!(outcomes.len(), 4);
        for (category, result) in &outcomes {
            assert_eq!(result.is_err(), *category == Category::TopRated);
        }

        let notices = home.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].0, Category::TopRated);
        assert_eq!(notices[0].1.error_type, ErrorType::ExternalService);

        let popular = settle(&mut home.feed(Category::Popular).state(), |s| {
            s.value().map_or(false, |m| m.len() == 2)
        })
        .await;
        assert_eq!(titles(&popular), vec!["Alien", "Heat"]);

        // The failed tab still shows what the cache has
        let top_rated = settle(&mut home.feed(Category::TopRated).state(), |s| {
            !s.is_loading()
        })
        .await;
        assert_eq!(top_rated, QueryState::Ready(Vec::new()));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_cached_rows_and_raises_notice() {
        let mut api = MockCatalogApi::new();
        let mut calls = 0;
        api.expect_list_movies().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(vec![item(1, "Alien")])
            } else {
                Err(AppError::RemoteRejected("status 503".to_string()))
            }
        });
        let (_dir, state) = app(api);
        let home = state.home();
        let feed = home.feed(Category::Upcoming);

        feed.activate().await.unwrap();
        assert!(feed.current_notice().is_none());

        assert!(feed.activate().await.is_err());

        let listing = settle(&mut feed.state(), |s| s.value().is_some()).await;
        assert_eq!(titles(&listing), vec!["Alien"]);
        assert_eq!(
            feed.current_notice().map(|n| n.error_type),
            Some(ErrorType::ExternalService)
        );
    }

    #[tokio::test]
    async fn test_selected_tab_is_owned_by_home() {
        let (_dir, state) = app(MockCatalogApi::new());
        let home = state.home();
        let mut selected = home.selected();

        assert_eq!(*selected.borrow_and_update(), Category::NowPlaying);
        assert_eq!(home.selected_feed().category(), Category::NowPlaying);

        home.select(Category::TopRated);
        assert!(selected.has_changed().unwrap());
        assert_eq!(*selected.borrow_and_update(), Category::TopRated);
        assert_eq!(home.selected_feed().category(), Category::TopRated);

        home.select(Category::TopRated);
        assert!(!selected.has_changed().unwrap());
    }

    // ========================================================================
    // FAVOURITES
    // ========================================================================

    #[tokio::test]
    async fn test_favourites_feed_follows_toggles() {
        let mut api = MockCatalogApi::new();
        api.expect_list_movies()
            .returning(|_| Ok(vec![item(1, "Alien"), item(2, "Heat")]));
        let (_dir, state) = app(api);
        let home = state.home();
        let favourites = state.favourites();

        home.feed(Category::Popular).refresh().await.unwrap();
        favourites.activate();

        let mut rx = favourites.state();
        settle(&mut rx, |s| s.value().is_some()).await;

        favourites.toggle_favourite(2, true).await.unwrap();
        let listed = settle(&mut rx, |s| s.value().map_or(false, |m| !m.is_empty())).await;
        assert_eq!(titles(&listed), vec!["Heat"]);

        home.feed(Category::Popular)
            .toggle_favourite(2, false)
            .await
            .unwrap();
        settle(&mut rx, |s| s.value().map_or(false, |m| m.is_empty())).await;
    }

    // ========================================================================
    // SEARCH
    // ========================================================================

    fn search_catalog() -> MockCatalogApi {
        let mut api = MockCatalogApi::new();
        api.expect_list_movies().returning(|_| {
            Ok(vec![
                item(1, "Bat Out of Hell"),
                item(2, "The Batman"),
                item(3, "Batman Begins"),
                item(4, "Alien"),
            ])
        });
        api
    }

    #[tokio::test]
    async fn test_search_starts_ready_and_empty() {
        let (_dir, state) = app(MockCatalogApi::new());
        let search = state.search();

        assert_eq!(search.current(), QueryState::Ready(Vec::new()));
    }

    #[tokio::test]
    async fn test_search_applies_only_latest_query() {
        let (_dir, state) = app(search_catalog());
        state
            .catalog_service
            .refresh_category(Category::Popular)
            .await
            .unwrap();

        let search = state.search();
        let mut rx = search.state();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = {
            let seen = Arc::clone(&seen);
            let mut rx = search.state();
            tokio::spawn(async move {
                while rx.changed().await.is_ok() {
                    let state = rx.borrow_and_update().clone();
                    seen.lock().unwrap().push(titles(&state));
                }
            })
        };

        search.set_query("bat");
        search.set_query("batman");

        let results = settle(&mut rx, |s| s.value().map_or(false, |m| !m.is_empty())).await;
        assert_eq!(titles(&results), vec!["Batman Begins", "The Batman"]);

        tokio::time::sleep(Duration::from_millis(200)).await;
        recorder.abort();

        assert_eq!(titles(&search.current()), vec!["Batman Begins", "The Batman"]);
        assert!(seen
            .lock()
            .unwrap()
            .iter()
            .all(|titles| !titles.iter().any(|t| t == "Bat Out of Hell")));
    }

    #[tokio::test]
    async fn test_blank_query_clears_results() {
        let (_dir, state) = app(search_catalog());
        state
            .catalog_service
            .refresh_category(Category::Popular)
            .await
            .unwrap();

        let search = state.search();
        let mut rx = search.state();

        search.set_query("alien");
        let results = settle(&mut rx, |s| s.value().map_or(false, |m| !m.is_empty())).await;
        assert_eq!(titles(&results), vec!["Alien"]);

        search.set_query("   ");
        let cleared = settle(&mut rx, |s| s.value().map_or(false, |m| m.is_empty())).await;
        assert_eq!(cleared, QueryState::Ready(Vec::new()));
    }

    // ========================================================================
    // DETAILS
    // ========================================================================

    #[tokio::test]
    async fn test_details_feed_loads_and_follows_favourite() {
        let mut api = MockCatalogApi::new();
        api.expect_movie_details()
            .times(1)
            .returning(|id| Ok(Some(details_dto(id))));
        let (_dir, state) = app(api);
        let details = state.details(414906);

        details.load().await.unwrap();
        let loaded = details.current();
        assert_eq!(loaded.value().map(|d| d.title.as_str()), Some("The Batman"));
        assert_eq!(loaded.value().map(|d| d.is_favourite), Some(false));

        details.toggle_favourite(true).await.unwrap();
        settle(&mut details.state(), |s| {
            s.value().map_or(false, |d| d.is_favourite)
        })
        .await;
    }

    #[tokio::test]
    async fn test_details_feed_failure_then_retry() {
        let mut api = MockCatalogApi::new();
        let mut calls = 0;
        api.expect_movie_details().times(2).returning(move |id| {
            calls += 1;
            if calls == 1 {
                Err(AppError::RemoteUnavailable("connection refused".to_string()))
            } else {
                Ok(Some(details_dto(id)))
            }
        });
        let (_dir, state) = app(api);
        let details = state.details(414906);

        assert!(details.load().await.is_err());
        assert_eq!(
            details.current().error().map(|e| e.error_type),
            Some(ErrorType::ExternalService)
        );

        details.load().await.unwrap();
        assert!(details.current().value().is_some());
    }

    #[tokio::test]
    async fn test_details_feed_not_found() {
        let mut api = MockCatalogApi::new();
        api.expect_movie_details().returning(|_| Ok(None));
        let (_dir, state) = app(api);
        let details = state.details(42);

        assert!(details.load().await.unwrap_err().is_not_found());
        assert_eq!(
            details.current().error().map(|e| e.error_type),
            Some(ErrorType::NotFound)
        );
    }

    // ========================================================================
    // WIRING
    // ========================================================================

    #[tokio::test]
    async fn test_initialize_opens_empty_cache() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::with_path("test-key", dir.path().join("nested").join("cache.db"))
            .unwrap();

        let state = AppState::initialize(config).unwrap();
        let stats = state.database_stats().unwrap();

        assert_eq!(stats.summary_rows, 0);
        assert_eq!(stats.detail_rows, 0);
        assert!(dir.path().join("nested").join("cache.db").exists());
    }
}
