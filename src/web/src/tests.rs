use crate::{LeagueAppData, ServerConfig, ServerRoutes, USER_ID_HEADER};
use axum::body::Body;
use axum::http::header::{ACCEPT_LANGUAGE, CONTENT_TYPE};
use axum::http::{Request, StatusCode};
use axum::Router;
use league_core::finance::{CostCategory, CostSetting};
use league_core::team::Team;
use league_core::user::{User, UserRole};
use league_core::{LeagueData, Money};
use serde_json::{json, Value};
use tower::ServiceExt;

const ADMIN: u32 = 10;
const REFEREE: u32 = 11;
const MANAGER: u32 = 12;

fn app() -> (Router, LeagueAppData) {
    let mut data = LeagueData::new();

    for (id, name) in [(1, "VV De Eendracht"), (2, "SV Noordwijk"), (3, "FC De Polder"), (4, "SC Oost")] {
        data.teams.push(Team::new(id, String::from(name)));
    }

    data.users.push(User::new(ADMIN, String::from("beheer"), UserRole::Admin, Vec::new()));
    data.users.push(User::new(REFEREE, String::from("willem"), UserRole::Referee, Vec::new()));
    data.users.push(User::new(MANAGER, String::from("jan"), UserRole::PlayerManager, vec![1]));

    data.cost_settings.push(CostSetting {
        id: 30,
        name: String::from("Veldkosten"),
        amount: Money::from_cents(4500),
        category: CostCategory::MatchCost,
        description: None,
        is_active: true,
    });

    data.reindex();

    let state = LeagueAppData::new(data, ServerConfig::in_memory());

    (ServerRoutes::create(state.clone()), state)
}

async fn send(app: &Router, method: &str, uri: &str, user: Option<u32>, body: Option<Value>) -> (StatusCode, Value) {
    send_with_lang(app, method, uri, user, body, None).await
}

async fn send_with_lang(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<u32>,
    body: Option<Value>,
    lang: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(user) = user {
        builder = builder.header(USER_ID_HEADER, user.to_string());
    }
    if let Some(lang) = lang {
        builder = builder.header(ACCEPT_LANGUAGE, lang);
    }

    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn create_match(app: &Router, home: u32, away: u32) -> u32 {
    let (status, body) = send(
        app,
        "POST",
        "/api/matches",
        Some(ADMIN),
        Some(json!({
            "home_team_id": home,
            "away_team_id": away,
            "date": "2025-09-06",
            "time": "10:00:00"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_u64().unwrap() as u32
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app();

    let (status, body) = send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["teams"], 4);
}

#[tokio::test]
async fn test_sync_requires_admin() {
    let (app, _) = app();

    let (status, _) = send(&app, "POST", "/functions/sync-all-match-costs", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "POST", "/functions/sync-all-match-costs", Some(MANAGER), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "POST", "/functions/sync-all-match-costs", Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"syncedCount": 0, "updatedCount": 0, "skippedCount": 0}));
}

#[tokio::test]
async fn test_unknown_user_is_rejected() {
    let (app, _) = app();

    let (status, _) = send(&app, "GET", "/api/me", Some(999), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_score_then_cost_sync() {
    let (app, state) = app();
    let match_id = create_match(&app, 1, 2).await;

    let uri = format!("/api/matches/{}/score", match_id);
    let (status, body) = send(&app, "POST", &uri, Some(MANAGER), Some(json!({"home_score": 2, "away_score": 1}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_submitted"], true);

    let (_, first) = send(&app, "POST", "/functions/sync-all-match-costs", Some(ADMIN), None).await;
    assert_eq!(first["syncedCount"], 1);

    let (_, second) = send(&app, "POST", "/functions/sync-all-match-costs", Some(ADMIN), None).await;
    assert_eq!(second["syncedCount"], 0);
    assert_eq!(second["skippedCount"], 1);

    let (status, finances) = send(&app, "GET", "/api/teams/1/finances", Some(MANAGER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(finances["balance_cents"], -4500);
    assert_eq!(finances["in_debt"], true);

    let (status, _) = send(&app, "GET", "/api/teams/2/finances", Some(MANAGER), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let data = state.data.read().await;
    assert!(data.transactions.iter().all(|t| t.recorded_by == Some(ADMIN)));
}

#[tokio::test]
async fn test_locked_match_rejects_manager_score() {
    let (app, _) = app();
    let match_id = create_match(&app, 1, 2).await;

    let (status, _) = send(&app, "POST", &format!("/api/matches/{}/lock", match_id), Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/api/matches/{}/score", match_id);
    let (status, _) = send(&app, "POST", &uri, Some(MANAGER), Some(json!({"home_score": 0, "away_score": 3}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "DELETE", &format!("/api/matches/{}", match_id), Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_manager_moves_kickoff_until_locked() {
    let (app, _) = app();
    let match_id = create_match(&app, 1, 2).await;
    let uri = format!("/api/matches/{}", match_id);

    let (status, body) = send(&app, "PUT", &uri, Some(MANAGER), Some(json!({"time": "11:30:00"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["time"], "11:30:00");

    let (status, _) = send(&app, "PUT", &uri, Some(MANAGER), Some(json!({"referee_id": REFEREE}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let other = create_match(&app, 3, 4).await;
    let (status, _) = send(&app, "PUT", &format!("/api/matches/{}", other), Some(MANAGER), Some(json!({"time": "12:00:00"}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    send(&app, "POST", &format!("{}/lock", uri), Some(ADMIN), None).await;

    let (status, _) = send(&app, "PUT", &uri, Some(MANAGER), Some(json!({"time": "12:00:00"}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "PUT", &uri, Some(ADMIN), Some(json!({"referee_id": REFEREE}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["referee_id"], REFEREE);
}

#[tokio::test]
async fn test_errors_are_localized() {
    let (app, _) = app();

    let (status, body) = send(&app, "GET", "/api/teams/99", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Niet gevonden");

    let (_, body) = send_with_lang(&app, "GET", "/api/teams/99", None, None, Some("en-GB,en;q=0.8")).await;
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn test_manager_edits_only_own_team() {
    let (app, _) = app();
    let colors = json!({"colors": {"primary": "#000000", "secondary": "#ffffff"}});

    let (status, body) = send(&app, "PUT", "/api/teams/1", Some(MANAGER), Some(colors.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["colors"]["primary"], "#000000");

    let (status, _) = send(&app, "PUT", "/api/teams/2", Some(MANAGER), Some(colors)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "PUT", "/api/teams/1", Some(MANAGER), Some(json!({"name": "Nieuw"}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_cannot_link_referee_to_team() {
    let (app, _) = app();

    let (status, _) = send(
        &app,
        "POST",
        "/api/users",
        Some(ADMIN),
        Some(json!({"username": "piet", "role": "referee", "team_ids": [1]})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(ADMIN),
        Some(json!({"username": "piet", "role": "referee"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 31);
}

#[tokio::test]
async fn test_generate_and_persist_schedule() {
    let (app, state) = app();

    let request = json!({
        "config": {
            "competition_name": "Najaarscompetitie",
            "start_date": "2025-09-01",
            "match_days": ["Sat"],
            "time_slots": ["10:00:00", "12:00:00"]
        },
        "teams": [
            {"team_id": 1, "team_name": "VV De Eendracht"},
            {"team_id": 2, "team_name": "SV Noordwijk"},
            {"team_id": 3, "team_name": "FC De Polder"},
            {"team_id": 4, "team_name": "SC Oost"}
        ]
    });

    let (status, body) = send(
        &app,
        "POST",
        "/functions/generate-competition-schedule",
        Some(ADMIN),
        Some(request.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matches"].as_array().unwrap().len(), 6);
    assert!(state.data.read().await.matches.is_empty());

    let (status, body) = send(
        &app,
        "POST",
        "/functions/generate-competition-schedule?persist=true",
        Some(ADMIN),
        Some(request),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["persisted_match_ids"].as_array().unwrap().len(), 6);
    assert_eq!(state.data.read().await.matches.len(), 6);
}

#[tokio::test]
async fn test_notifications_follow_target() {
    let (app, _) = app();

    let (status, _) = send(
        &app,
        "POST",
        "/api/notifications",
        Some(ADMIN),
        Some(json!({
            "title": "Scheidsrechtersoverleg",
            "message": "Maandag om 20:00 in de kantine",
            "target": {"type": "roles", "ids": ["referee"]},
            "starts_at": "2020-01-01T00:00:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, public) = send(&app, "GET", "/api/notifications", None, None).await;
    assert_eq!(public.as_array().unwrap().len(), 0);

    let (_, referee) = send(&app, "GET", "/api/notifications", Some(REFEREE), None).await;
    assert_eq!(referee.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cup_flow() {
    let (app, _) = app();

    let (status, created) = send(
        &app,
        "POST",
        "/api/cup/seed",
        Some(ADMIN),
        Some(json!({"team_ids": [1, 2, 3, 4], "date": "2025-10-04", "time": "14:00:00"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created = created.as_array().unwrap().clone();
    assert_eq!(created.len(), 2);

    for semi in &created {
        let id = semi["id"].as_u64().unwrap();
        let winner = semi["home_team_id"].as_u64().unwrap();
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/cup/matches/{}/advance", id),
            Some(ADMIN),
            Some(json!({"winner_team_id": winner})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, bracket) = send(&app, "GET", "/api/cup/bracket?kind=cup", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bracket["matches"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (app, _) = app();

    let (status, body) = send(&app, "GET", "/api/nothing", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("/api/nothing"));
}
