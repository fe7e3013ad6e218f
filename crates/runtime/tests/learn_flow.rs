//! End-to-end learn flow against the embedded default content set.

use std::sync::Arc;

use runtime::{MemoryRepository, OracleManager, RecordingLink, SpecRepository, TalentService, Topic};
use talent_core::types::{CharacterId, CharacterPointType, SpellId};

const WARFARE: u16 = 1;

fn service() -> (TalentService, Arc<MemoryRepository>) {
    let _ = tracing_subscriber::fmt::try_init();
    let oracles = OracleManager::load_defaults().expect("default content loads");
    let repository = Arc::new(MemoryRepository::new());
    (TalentService::new(oracles, repository.clone()), repository)
}

fn leveled_character(service: &mut TalentService, link: &RecordingLink) {
    service.on_character_create(link);
    link.set_level(60);
    service.on_level_changed(link, 9);
    link.clear();
}

#[test]
fn learning_spends_points_and_pushes_updates() {
    let (mut service, repository) = service();
    let link = RecordingLink::new(CharacterId(1), 9);
    leveled_character(&mut service, &link);

    service.handle_message(&link, Topic::LearnTalent.wire_id(), "1^48100");

    // Spell book delta applied through the link.
    assert_eq!(link.learned(), vec![SpellId(48101)]);
    assert!(link.removed().is_empty());

    // Refreshed rank snapshot and spec overview pushed.
    let ranks = link.sent_on(Topic::GetTalents);
    assert_eq!(ranks.len(), 1);
    assert!(ranks[0].starts_with("1^1^"));
    assert!(ranks[0].contains("48100~1"));
    assert!(!link.sent_on(Topic::GetCharacterSpecs).is_empty());

    // State and persistence agree.
    let state = service.character(CharacterId(1)).unwrap();
    let spec = state.active_spec().unwrap();
    assert_eq!(spec.rank_of(talent_core::TabId(WARFARE as u32), SpellId(48100)), 1);
    let stored = repository.load_character(CharacterId(1)).unwrap().unwrap();
    assert_eq!(&stored, state);
}

#[test]
fn rank_upgrades_swap_the_previous_rank_spell() {
    let (mut service, _repository) = service();
    let link = RecordingLink::new(CharacterId(2), 9);
    leveled_character(&mut service, &link);

    service.handle_message(&link, Topic::LearnTalent.wire_id(), "1^48100");
    link.clear();
    service.handle_message(&link, Topic::LearnTalent.wire_id(), "1^48100");

    assert_eq!(link.removed(), vec![SpellId(48101)]);
    assert_eq!(link.learned(), vec![SpellId(48102)]);
}

#[test]
fn illegal_learns_answer_on_the_error_topic_and_change_nothing() {
    let (mut service, _repository) = service();
    let link = RecordingLink::new(CharacterId(3), 9);
    leveled_character(&mut service, &link);

    // Deep capstone with nothing invested: rejected.
    service.handle_message(&link, Topic::LearnTalent.wire_id(), "1^48150");

    assert!(!link.sent_on(Topic::GetTalentError).is_empty());
    assert!(link.learned().is_empty());
    let state = service.character(CharacterId(3)).unwrap();
    let spec = state.active_spec().unwrap();
    assert_eq!(spec.points_in_tab(talent_core::TabId(1)), 0);
}

#[test]
fn full_tree_walk_reaches_the_capstone() {
    let (mut service, _repository) = service();
    let link = RecordingLink::new(CharacterId(4), 9);
    leveled_character(&mut service, &link);

    // Invest down the Warfare tab.
    for _ in 0..5 {
        service.handle_message(&link, Topic::LearnTalent.wire_id(), "1^48100");
    }
    for _ in 0..3 {
        service.handle_message(&link, Topic::LearnTalent.wire_id(), "1^48110");
    }
    for _ in 0..2 {
        service.handle_message(&link, Topic::LearnTalent.wire_id(), "1^48120");
    }
    service.handle_message(&link, Topic::LearnTalent.wire_id(), "1^48130");

    // Cross-tab requirement lives in Tactics.
    service.handle_message(&link, Topic::LearnTalent.wire_id(), "2^48200");

    link.clear();
    service.handle_message(&link, Topic::LearnTalent.wire_id(), "1^48150");

    assert!(link.sent_on(Topic::GetTalentError).is_empty());
    assert_eq!(link.learned(), vec![SpellId(48151)]);
    // The capstone clears its unlearn list on the way in.
    assert!(link.removed().contains(&SpellId(48001)));

    let state = service.character(CharacterId(4)).unwrap();
    let spec = state.active_spec().unwrap();
    assert_eq!(spec.points_in_tab(talent_core::TabId(1)), 12);
    assert_eq!(spec.points_in_tab(talent_core::TabId(2)), 1);
}

#[test]
fn choice_selection_round_trips_over_the_wire() {
    let (mut service, _repository) = service();
    let link = RecordingLink::new(CharacterId(5), 9);
    leveled_character(&mut service, &link);

    for _ in 0..5 {
        service.handle_message(&link, Topic::LearnTalent.wire_id(), "1^48100");
    }
    for _ in 0..3 {
        service.handle_message(&link, Topic::LearnTalent.wire_id(), "1^48110");
    }

    // Unselected choice node renders as zero.
    link.clear();
    service.handle_message(&link, Topic::GetTalents.wire_id(), "1");
    assert!(link.sent_on(Topic::GetTalents)[0].contains("48140~0"));

    // Selecting encodes the alternative's id, not the rank counter.
    link.clear();
    service.handle_message(&link, Topic::LearnChoice.wire_id(), "1^48140^48142");
    assert_eq!(link.learned(), vec![SpellId(48142)]);
    assert!(link.sent_on(Topic::GetTalents)[0].contains("48140~48142"));

    // Re-selecting swaps the alternative without spending another point.
    let spent_before = service
        .character(CharacterId(5))
        .unwrap()
        .active_spec()
        .unwrap()
        .points_in_tab(talent_core::TabId(1));
    link.clear();
    service.handle_message(&link, Topic::LearnChoice.wire_id(), "1^48140^48141");
    assert_eq!(link.removed(), vec![SpellId(48142)]);
    assert_eq!(link.learned(), vec![SpellId(48141)]);
    let spent_after = service
        .character(CharacterId(5))
        .unwrap()
        .active_spec()
        .unwrap()
        .points_in_tab(talent_core::TabId(1));
    assert_eq!(spent_before, spent_after);
}

#[test]
fn respec_refunds_the_whole_tab() {
    let (mut service, repository) = service();
    let link = RecordingLink::new(CharacterId(6), 9);
    leveled_character(&mut service, &link);

    for _ in 0..5 {
        service.handle_message(&link, Topic::LearnTalent.wire_id(), "1^48100");
    }
    let state = service.character(CharacterId(6)).unwrap();
    let spec_id = state.active_spec().unwrap().id;
    let available_before = state.available(spec_id, CharacterPointType::Class);

    link.clear();
    service.handle_message(&link, Topic::RespecTalents.wire_id(), "1");

    assert_eq!(link.removed(), vec![SpellId(48105)]);
    let state = service.character(CharacterId(6)).unwrap();
    assert_eq!(
        state.available(spec_id, CharacterPointType::Class),
        available_before + 5
    );
    let spec = state.active_spec().unwrap();
    assert_eq!(spec.points_in_tab(talent_core::TabId(1)), 0);
    assert!(spec.talents.get(&talent_core::TabId(1)).is_none());

    let stored = repository.load_character(CharacterId(6)).unwrap().unwrap();
    assert_eq!(&stored, state);
}
