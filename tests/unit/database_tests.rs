/*!
 * Unit tests for the database layer
 */

use anyhow::Result;
use signbridge::database::models::{
    FeedbackRecord, RecognitionSource, SessionRecord, SessionStatus, SignLanguageRecord,
    TranslationRecord, UserProfileRecord, UserRole,
};
use signbridge::database::repository::Repository;

use crate::common;

fn sample_session(id: &str, user: Option<&str>) -> SessionRecord {
    SessionRecord::new(
        id.to_string(),
        user.map(String::from),
        Some("ASL".to_string()),
        "test-agent".to_string(),
    )
}

fn sample_record(session_id: &str, sign: &str) -> TranslationRecord {
    TranslationRecord::new(
        session_id.to_string(),
        sign.to_string(),
        format!("{}!", sign),
        0.9,
        RecognitionSource::Live,
        String::new(),
    )
}

#[tokio::test]
async fn test_seedLanguages_twice_shouldBeIdempotent() -> Result<()> {
    let repo = Repository::new_in_memory()?;
    let languages = vec![SignLanguageRecord::new("ASL", "American Sign Language", "")];

    let first = repo.seed_languages(languages.clone()).await?;
    let second = repo.seed_languages(languages).await?;

    assert_eq!(first, 1);
    assert_eq!(second, 0);
    assert_eq!(repo.list_active_languages().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_getLanguage_withUnknownCode_shouldReturnNone() -> Result<()> {
    let repo = common::seeded_repository().await?;
    assert!(repo.get_language("ZZZ").await?.is_none());
    assert!(repo.get_language("ASL").await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_endSession_shouldSetEndedAtExactlyOnce() -> Result<()> {
    let repo = common::seeded_repository().await?;
    repo.create_session(&sample_session("s1", None)).await?;

    assert!(repo.end_session("s1").await?);
    let ended = repo.get_session("s1").await?.unwrap();
    assert_eq!(ended.status, SessionStatus::Ended);
    let first_ended_at = ended.ended_at.clone().unwrap();

    // The second end must not touch the row
    assert!(!repo.end_session("s1").await?);
    let still_ended = repo.get_session("s1").await?.unwrap();
    assert_eq!(still_ended.ended_at.as_deref(), Some(first_ended_at.as_str()));
    Ok(())
}

#[tokio::test]
async fn test_insertRecord_shouldAssignIncreasingIds() -> Result<()> {
    let repo = common::seeded_repository().await?;
    repo.create_session(&sample_session("s1", None)).await?;

    let first = repo.insert_record(&sample_record("s1", "Hello"), None).await?;
    let second = repo.insert_record(&sample_record("s1", "Yes"), None).await?;
    assert!(second.id > first.id);

    let records = repo.get_records("s1").await?;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].detected_sign, "Hello");
    assert_eq!(records[1].detected_sign, "Yes");
    Ok(())
}

#[tokio::test]
async fn test_insertRecord_withOwner_shouldIncrementCounter() -> Result<()> {
    let repo = common::seeded_repository().await?;
    repo.create_user(&UserProfileRecord::new("alice", UserRole::Viewer))
        .await?;
    repo.create_session(&sample_session("s1", Some("alice"))).await?;

    repo.insert_record(&sample_record("s1", "Hello"), Some("alice"))
        .await?;
    repo.insert_record(&sample_record("s1", "Yes"), Some("alice"))
        .await?;

    let profile = repo.get_user("alice").await?.unwrap();
    assert_eq!(profile.total_translations, 2);
    Ok(())
}

#[tokio::test]
async fn test_listSessions_withUserFilter_shouldExcludeOthers() -> Result<()> {
    let repo = common::seeded_repository().await?;
    repo.create_session(&sample_session("s1", Some("alice"))).await?;
    repo.create_session(&sample_session("s2", Some("bob"))).await?;
    repo.create_session(&sample_session("s3", None)).await?;

    let alice_sessions = repo.list_sessions(Some("alice")).await?;
    assert_eq!(alice_sessions.len(), 1);
    assert_eq!(alice_sessions[0].id, "s1");

    let all_sessions = repo.list_sessions(None).await?;
    assert_eq!(all_sessions.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_insertFeedback_shouldRoundTrip() -> Result<()> {
    let repo = common::seeded_repository().await?;
    repo.create_session(&sample_session("s1", None)).await?;

    let feedback = FeedbackRecord::new(
        "s1".to_string(),
        4,
        Some("Thank you".to_string()),
        None,
    );
    let stored = repo.insert_feedback(&feedback).await?;
    assert!(stored.id > 0);

    let listed = repo.get_feedback("s1").await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].rating, 4);
    assert_eq!(listed[0].correction.as_deref(), Some("Thank you"));
    Ok(())
}

#[tokio::test]
async fn test_insertFeedback_withMissingSession_shouldFailForeignKey() -> Result<()> {
    let repo = common::seeded_repository().await?;

    let feedback = FeedbackRecord::new("ghost".to_string(), 3, None, None);
    assert!(repo.insert_feedback(&feedback).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_stats_shouldCountEntities() -> Result<()> {
    let repo = common::seeded_repository().await?;
    repo.create_session(&sample_session("s1", None)).await?;
    repo.insert_record(&sample_record("s1", "Hello"), None).await?;

    let stats = repo.stats()?;
    assert_eq!(stats.session_count, 1);
    assert_eq!(stats.record_count, 1);
    assert_eq!(stats.language_count, 2);
    Ok(())
}
