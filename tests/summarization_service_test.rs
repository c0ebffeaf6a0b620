mod helpers;

use std::sync::Arc;

use chrono::TimeDelta;

use pdf_summarizer::application::ports::Clock;
use pdf_summarizer::application::services::{
    AttemptOutcome, CooldownTracker, SummarizationError, SummarizationService,
    build_summary_messages,
};
use pdf_summarizer::domain::{Chunk, ProviderId};

use helpers::{ManualClock, Reply, ScriptedLlmClient, as_providers, start_time};

fn chunk(text: &str) -> Chunk {
    Chunk::new(0, text.to_string())
}

struct Fixture {
    service: SummarizationService,
    cooldowns: Arc<CooldownTracker>,
    clock: Arc<ManualClock>,
}

fn fixture(clients: &[&Arc<ScriptedLlmClient>]) -> Fixture {
    let cooldowns = Arc::new(CooldownTracker::default());
    let clock = Arc::new(ManualClock::new(start_time()));
    let service = SummarizationService::new(
        as_providers(clients),
        Arc::clone(&cooldowns),
        Arc::clone(&clock) as Arc<dyn Clock>,
    );
    Fixture {
        service,
        cooldowns,
        clock,
    }
}

#[tokio::test]
async fn given_first_provider_succeeds_when_summarizing_then_later_providers_are_not_called() {
    let a = ScriptedLlmClient::always("a", Reply::Text("summary from a".to_string()));
    let b = ScriptedLlmClient::always("b", Reply::Text("summary from b".to_string()));
    let f = fixture(&[&a, &b]);

    let result = f.service.summarize_chunk(&chunk("text")).await.unwrap();

    assert_eq!(result, "summary from a");
    assert_eq!(a.calls(), 1);
    assert_eq!(b.calls(), 0);
}

#[tokio::test]
async fn given_rate_limited_then_failing_then_succeeding_providers_when_summarizing_then_uses_third_and_cools_only_first()
 {
    let a = ScriptedLlmClient::always("a", Reply::RateLimited);
    let b = ScriptedLlmClient::always("b", Reply::Failed);
    let c = ScriptedLlmClient::always("c", Reply::Text("summary from c".to_string()));
    let f = fixture(&[&a, &b, &c]);

    let result = f.service.summarize_chunk(&chunk("text")).await.unwrap();

    assert_eq!(result, "summary from c");
    let now = start_time();
    assert!(!f.cooldowns.is_available(&ProviderId::from("a"), now));
    assert!(f.cooldowns.is_available(&ProviderId::from("b"), now));
    assert!(f.cooldowns.is_available(&ProviderId::from("c"), now));
}

#[tokio::test]
async fn given_provider_in_cooldown_when_summarizing_next_chunk_then_provider_is_skipped() {
    let a = ScriptedLlmClient::always("a", Reply::RateLimited);
    let b = ScriptedLlmClient::always("b", Reply::Text("summary from b".to_string()));
    let f = fixture(&[&a, &b]);

    f.service.summarize_chunk(&chunk("first")).await.unwrap();
    f.clock.advance(TimeDelta::minutes(5));
    f.service.summarize_chunk(&chunk("second")).await.unwrap();

    assert_eq!(a.calls(), 1);
    assert_eq!(b.calls(), 2);
}

#[tokio::test]
async fn given_cooldown_expired_when_summarizing_then_provider_is_tried_again() {
    let a = ScriptedLlmClient::scripted(
        "a",
        vec![Reply::RateLimited],
        Reply::Text("a is back".to_string()),
    );
    let b = ScriptedLlmClient::always("b", Reply::Text("summary from b".to_string()));
    let f = fixture(&[&a, &b]);

    f.service.summarize_chunk(&chunk("first")).await.unwrap();
    f.clock.advance(TimeDelta::minutes(20));
    let result = f.service.summarize_chunk(&chunk("second")).await.unwrap();

    assert_eq!(result, "a is back");
    assert_eq!(a.calls(), 2);
    assert_eq!(b.calls(), 1);
}

#[tokio::test]
async fn given_all_providers_fail_when_summarizing_then_returns_all_unavailable_with_attempts() {
    let a = ScriptedLlmClient::always("a", Reply::RateLimited);
    let b = ScriptedLlmClient::always("b", Reply::Failed);
    let c = ScriptedLlmClient::always("c", Reply::Failed);
    let f = fixture(&[&a, &b, &c]);

    let result = f.service.summarize_chunk(&chunk("text")).await;

    let Err(SummarizationError::AllProvidersUnavailable { attempts }) = result else {
        panic!("expected AllProvidersUnavailable");
    };
    let names: Vec<&str> = attempts.iter().map(|a| a.provider.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert!(matches!(attempts[0].outcome, AttemptOutcome::RateLimited(_)));
    assert!(matches!(attempts[1].outcome, AttemptOutcome::Failed(_)));
    assert_eq!(a.calls() + b.calls() + c.calls(), 3);
}

#[tokio::test]
async fn given_all_providers_in_cooldown_when_summarizing_then_fails_without_calling_any() {
    let a = ScriptedLlmClient::always("a", Reply::Text("never".to_string()));
    let b = ScriptedLlmClient::always("b", Reply::Text("never".to_string()));
    let f = fixture(&[&a, &b]);
    f.cooldowns.mark_rate_limited(&ProviderId::from("a"), start_time());
    f.cooldowns.mark_rate_limited(&ProviderId::from("b"), start_time());

    let result = f.service.summarize_chunk(&chunk("text")).await;

    let Err(SummarizationError::AllProvidersUnavailable { attempts }) = result else {
        panic!("expected AllProvidersUnavailable");
    };
    assert!(
        attempts
            .iter()
            .all(|a| matches!(a.outcome, AttemptOutcome::CoolingDown { .. }))
    );
    assert_eq!(a.calls(), 0);
    assert_eq!(b.calls(), 0);
}

#[tokio::test]
async fn given_no_providers_when_summarizing_then_fails() {
    let f = fixture(&[]);

    let result = f.service.summarize_chunk(&chunk("text")).await;

    assert!(matches!(
        result,
        Err(SummarizationError::AllProvidersUnavailable { ref attempts }) if attempts.is_empty()
    ));
}

#[tokio::test]
async fn given_chunk_when_summarizing_then_provider_receives_two_message_prompt() {
    let a = ScriptedLlmClient::always("a", Reply::Text("ok".to_string()));
    let f = fixture(&[&a]);

    f.service
        .summarize_chunk(&chunk("Revenue rose 12%."))
        .await
        .unwrap();

    assert_eq!(a.last_messages(), build_summary_messages("Revenue rose 12%."));
}

#[tokio::test]
async fn given_rate_limit_when_clock_advances_then_provider_statuses_report_cooldown() {
    let a = ScriptedLlmClient::always("a", Reply::RateLimited);
    let b = ScriptedLlmClient::always("b", Reply::Text("ok".to_string()));
    let f = fixture(&[&a, &b]);

    f.service.summarize_chunk(&chunk("text")).await.unwrap();
    let statuses = f.service.provider_statuses();

    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0].provider.as_str(), "a");
    assert_eq!(
        statuses[0].cooldown_until,
        Some(start_time() + TimeDelta::minutes(20))
    );
    assert!(statuses[1].is_available());

    f.clock.advance(TimeDelta::minutes(20));
    assert!(f.service.provider_statuses()[0].is_available());
}
