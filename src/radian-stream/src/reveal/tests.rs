use pretty_assertions::assert_eq;
use radian_summary::{FinalSummary, SummarySnapshot};

use super::RevealScheduler;
use crate::config::RevealConfig;

/// Reveals whole short bullets in a single frame, no pacing delay.
fn fast_config() -> RevealConfig {
    RevealConfig {
        chars_per_second: 60_000.0,
        bullet_pacing_ms: 0,
        frame_rate: 60.0,
        ..RevealConfig::default()
    }
}

/// One character per frame, no pacing delay.
fn slow_config() -> RevealConfig {
    RevealConfig {
        chars_per_second: 60.0,
        bullet_pacing_ms: 0,
        frame_rate: 60.0,
        ..RevealConfig::default()
    }
}

fn snapshot(headline: &str, completed: &[&str], in_progress: &str) -> SummarySnapshot {
    SummarySnapshot {
        headline: headline.to_string(),
        completed_bullets: completed.iter().map(|b| b.to_string()).collect(),
        in_progress: in_progress.to_string(),
    }
}

fn settle(scheduler: &mut RevealScheduler) {
    for _ in 0..10_000 {
        if !scheduler.is_bullet_animating() && !scheduler.is_headline_animating() {
            return;
        }
        scheduler.tick();
    }
    panic!("scheduler did not settle");
}

#[test]
fn test_first_bullet_reveals_immediately() {
    let mut scheduler = RevealScheduler::new(&fast_config());

    scheduler.on_snapshot(&snapshot("", &["Vitals normal"], ""));
    assert_eq!(scheduler.visible_count(), 1);

    settle(&mut scheduler);
    assert_eq!(scheduler.visible_bullets(), vec!["Vitals normal".to_string()]);
}

#[test]
fn test_bullets_reveal_in_order_never_skipping() {
    let expected = ["first point", "second point", "third point"];
    let mut scheduler = RevealScheduler::new(&fast_config());

    scheduler.on_snapshot(&snapshot("", &expected[..1], ""));
    scheduler.on_snapshot(&snapshot("", &expected[..2], ""));
    scheduler.on_snapshot(&snapshot("", &expected, ""));

    let mut last_len = 0;
    for _ in 0..10_000 {
        let shown = scheduler.visible_bullets();
        assert!(shown.len() >= last_len, "exposed bullet disappeared");
        assert!(shown.len() <= last_len + 1, "bullets revealed out of pace");
        for (shown_text, expected_text) in shown.iter().zip(expected.iter()) {
            assert!(
                expected_text.starts_with(shown_text.as_str()),
                "shown {shown_text:?} is not a prefix of {expected_text:?}"
            );
        }
        last_len = shown.len();
        if !scheduler.is_bullet_animating() {
            break;
        }
        scheduler.tick();
    }

    let shown = scheduler.visible_bullets();
    assert_eq!(shown, expected.map(str::to_string).to_vec());
}

#[test]
fn test_next_bullet_waits_for_animation_and_pacing() {
    let config = RevealConfig {
        chars_per_second: 10_000.0,
        bullet_pacing_ms: 500,
        frame_rate: 10.0,
        ..RevealConfig::default()
    };
    let mut scheduler = RevealScheduler::new(&config);

    scheduler.on_snapshot(&snapshot("", &["one", "two"], ""));
    assert_eq!(scheduler.visible_count(), 1);

    let mut ticks_until_next = 0;
    while scheduler.visible_count() == 1 {
        scheduler.tick();
        ticks_until_next += 1;
        assert!(ticks_until_next < 100, "second bullet never revealed");
    }

    // 500ms at 10fps is a 5-frame countdown after the first bullet
    // finished animating.
    assert!(ticks_until_next > 5, "pacing delay was not applied");
    assert_eq!(scheduler.visible_count(), 2);
}

#[test]
fn test_at_most_one_reveal_per_tick() {
    let mut scheduler = RevealScheduler::new(&fast_config());
    scheduler.on_snapshot(&snapshot("", &["a", "b", "c", "d"], ""));

    let mut last = scheduler.visible_count();
    for _ in 0..10_000 {
        if !scheduler.is_bullet_animating() {
            break;
        }
        scheduler.tick();
        let now = scheduler.visible_count();
        assert!(now - last <= 1, "revealed {} bullets in one tick", now - last);
        last = now;
    }
    assert_eq!(scheduler.visible_count(), 4);
}

#[test]
fn test_tail_shown_only_when_caught_up() {
    let mut scheduler = RevealScheduler::new(&fast_config());

    // Caught up (no completed bullets): tail is displayed.
    scheduler.on_snapshot(&snapshot("", &[], "still strea"));
    settle(&mut scheduler);
    assert_eq!(scheduler.visible_bullets(), vec!["still strea".to_string()]);

    // Behind (second completed bullet not yet revealed): tail hidden.
    let mut scheduler = RevealScheduler::new(&fast_config());
    scheduler.on_snapshot(&snapshot("", &["one", "two"], "open tail"));
    assert_eq!(scheduler.visible_count(), 1);
    assert_eq!(scheduler.visible_bullets().len(), 1);
}

#[test]
fn test_tail_promotion_keeps_animation_progress() {
    let mut scheduler = RevealScheduler::new(&slow_config());

    scheduler.on_snapshot(&snapshot("", &[], "Vitals nor"));
    for _ in 0..4 {
        scheduler.tick();
    }
    assert_eq!(scheduler.visible_bullets(), vec!["Vita".to_string()]);

    // The tail closes into a completed bullet extending its text. The
    // reveal carries over: no flicker, no restart, no duplicate entry.
    scheduler.on_snapshot(&snapshot("", &["Vitals normal"], ""));
    assert_eq!(scheduler.visible_count(), 1);
    assert_eq!(scheduler.visible_bullets(), vec!["Vita".to_string()]);

    scheduler.tick();
    assert_eq!(scheduler.visible_bullets(), vec!["Vital".to_string()]);

    settle(&mut scheduler);
    assert_eq!(scheduler.visible_bullets(), vec!["Vitals normal".to_string()]);
}

#[test]
fn test_final_snaps_revealed_bullets_without_reanimating() {
    let mut scheduler = RevealScheduler::new(&fast_config());
    scheduler.on_snapshot(&snapshot("", &["old wording"], ""));
    settle(&mut scheduler);

    scheduler.on_final(&FinalSummary {
        headline: String::new(),
        bullets: vec!["new wording".to_string(), "second".to_string()],
    });

    // Already-shown bullet snaps to the final text immediately.
    assert_eq!(scheduler.visible_bullets()[0], "new wording");

    settle(&mut scheduler);
    assert_eq!(
        scheduler.visible_bullets(),
        vec!["new wording".to_string(), "second".to_string()]
    );
}

#[test]
fn test_final_shorter_list_clamps_display() {
    let mut scheduler = RevealScheduler::new(&fast_config());
    scheduler.on_snapshot(&snapshot("", &["one", "two"], ""));
    settle(&mut scheduler);
    assert_eq!(scheduler.visible_count(), 2);

    scheduler.on_final(&FinalSummary {
        headline: String::new(),
        bullets: vec!["one".to_string()],
    });

    // The display clamps to the final list; the frontier never decreases.
    assert_eq!(scheduler.visible_bullets(), vec!["one".to_string()]);
    assert_eq!(scheduler.visible_count(), 2);
    settle(&mut scheduler);
    assert!(!scheduler.is_bullet_animating());
}

#[test]
fn test_final_promotes_displayed_tail() {
    let mut scheduler = RevealScheduler::new(&slow_config());
    scheduler.on_snapshot(&snapshot("", &[], "Labs pend"));
    for _ in 0..4 {
        scheduler.tick();
    }
    assert_eq!(scheduler.visible_bullets(), vec!["Labs".to_string()]);

    scheduler.on_final(&FinalSummary {
        headline: String::new(),
        bullets: vec!["Labs pending".to_string()],
    });

    // Finalization closed the tail into a bullet; progress carries over.
    assert_eq!(scheduler.visible_bullets(), vec!["Labs".to_string()]);
    settle(&mut scheduler);
    assert_eq!(scheduler.visible_bullets(), vec!["Labs pending".to_string()]);
}

#[test]
fn test_headline_animates_and_does_not_restart_on_final() {
    let mut scheduler = RevealScheduler::new(&slow_config());
    scheduler.on_snapshot(&snapshot("Overall Status: Stable", &[], ""));
    assert!(scheduler.is_headline_animating());

    settle(&mut scheduler);
    assert!(!scheduler.is_headline_animating());
    assert_eq!(scheduler.headline_text(), "Overall Status: Stable");

    scheduler.on_final(&FinalSummary {
        headline: "Overall Status: Stable".to_string(),
        bullets: Vec::new(),
    });
    assert!(!scheduler.is_headline_animating());
    assert_eq!(scheduler.headline_text(), "Overall Status: Stable");
}

#[test]
fn test_final_headline_with_different_text_snaps() {
    let mut scheduler = RevealScheduler::new(&slow_config());
    scheduler.on_snapshot(&snapshot("Overall Status: Stable", &[], ""));
    scheduler.tick();
    assert!(scheduler.is_headline_animating());

    scheduler.on_final(&FinalSummary {
        headline: "Overall Status: Deteriorating".to_string(),
        bullets: Vec::new(),
    });
    assert!(!scheduler.is_headline_animating());
    assert_eq!(scheduler.headline_text(), "Overall Status: Deteriorating");
}

#[test]
fn test_snapshot_after_final_is_ignored() {
    let mut scheduler = RevealScheduler::new(&fast_config());
    scheduler.on_final(&FinalSummary {
        headline: "Overall Status: Done".to_string(),
        bullets: vec!["only".to_string()],
    });

    scheduler.on_snapshot(&snapshot("Overall Status: Other", &["only", "late"], "tail"));
    settle(&mut scheduler);
    assert_eq!(scheduler.visible_bullets(), vec!["only".to_string()]);
    assert_eq!(scheduler.headline_text(), "Overall Status: Done");
}

#[test]
fn test_empty_headline_snapshot_keeps_previous_headline() {
    let mut scheduler = RevealScheduler::new(&fast_config());
    scheduler.on_snapshot(&snapshot("Overall Status: Stable", &[], ""));
    settle(&mut scheduler);

    scheduler.on_snapshot(&snapshot("", &["bullet"], ""));
    assert_eq!(scheduler.headline_text(), "Overall Status: Stable");
}
