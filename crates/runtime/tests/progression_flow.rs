//! Lifecycle hooks: creation grants, level cadence, login re-apply,
//! spec activation, deletion.

use std::sync::Arc;

use runtime::{MemoryRepository, OracleManager, RecordingLink, TalentService, Topic};
use talent_core::types::{CharacterId, CharacterPointType, SpellId};

fn oracles() -> OracleManager {
    let _ = tracing_subscriber::fmt::try_init();
    OracleManager::load_defaults().expect("default content loads")
}

#[test]
fn creation_seeds_one_spec_and_the_racial_grant() {
    let repository = Arc::new(MemoryRepository::new());
    let mut service = TalentService::new(oracles(), repository.clone());
    let link = RecordingLink::new(CharacterId(1), 1);

    service.on_character_create(&link);

    let state = service.character(CharacterId(1)).unwrap();
    let spec = state.active_spec().expect("default spec slot");
    assert_eq!(spec.owner_tab, talent_core::TabId(1));
    assert_eq!(state.available(spec.id, CharacterPointType::Racial), 8);
    assert_eq!(state.granted(CharacterPointType::Racial), 8);
    assert_eq!(repository.len(), 1);
}

#[test]
fn level_cadence_grants_accumulate() {
    let mut service = TalentService::new(oracles(), Arc::new(MemoryRepository::new()));
    let link = RecordingLink::new(CharacterId(1), 9);
    service.on_character_create(&link);

    // 9 → 11: level 10 pays Class, level 11 pays Talent.
    link.set_level(10);
    service.on_level_changed(&link, 9);
    link.set_level(11);
    service.on_level_changed(&link, 10);

    let state = service.character(CharacterId(1)).unwrap();
    assert_eq!(state.granted(CharacterPointType::Class), 1);
    assert_eq!(state.granted(CharacterPointType::Talent), 1);

    // Downlevels grant nothing.
    link.set_level(10);
    service.on_level_changed(&link, 11);
    let state = service.character(CharacterId(1)).unwrap();
    assert_eq!(state.granted(CharacterPointType::Class), 1);
}

#[test]
fn login_reapplies_learned_spells_from_the_repository() {
    let repository = Arc::new(MemoryRepository::new());

    // First session: learn a few ranks and a choice alternative.
    {
        let mut service = TalentService::new(oracles(), repository.clone());
        let link = RecordingLink::new(CharacterId(9), 9);
        service.on_character_create(&link);
        link.set_level(60);
        service.on_level_changed(&link, 9);
        for _ in 0..5 {
            service.handle_message(&link, Topic::LearnTalent.wire_id(), "1^48100");
        }
        for _ in 0..3 {
            service.handle_message(&link, Topic::LearnTalent.wire_id(), "1^48110");
        }
        service.handle_message(&link, Topic::LearnChoice.wire_id(), "1^48140^48141");
    }

    // Fresh service, same repository: login loads and re-applies.
    let mut service = TalentService::new(oracles(), repository);
    let link = RecordingLink::new(CharacterId(9), 60);
    service.on_login(&link);

    let learned = link.learned();
    assert!(learned.contains(&SpellId(48105)));
    assert!(learned.contains(&SpellId(48113)));
    assert!(learned.contains(&SpellId(48141)));
    // Only the current ranks come back, not the superseded ones.
    assert!(!learned.contains(&SpellId(48104)));
}

#[test]
fn activating_a_second_spec_switches_rank_snapshots() {
    let mut service = TalentService::new(oracles(), Arc::new(MemoryRepository::new()));
    let link = RecordingLink::new(CharacterId(3), 9);
    service.on_character_create(&link);
    link.set_level(60);
    service.on_level_changed(&link, 9);

    service.handle_message(&link, Topic::LearnTalent.wire_id(), "1^48100");

    // Second empty spec slot, then switch to it.
    let second = service.grant_spec_slot(&link);

    link.clear();
    service.handle_message(&link, Topic::ActivateSpec.wire_id(), &second.0.to_string());

    assert!(link.sent_on(Topic::GetTalentError).is_empty());
    let state = service.character(CharacterId(3)).unwrap();
    assert_eq!(state.active_spec().unwrap().id, second);

    // The fresh spec has no learned ranks.
    let snapshots = link.sent_on(Topic::GetTalents);
    assert!(snapshots.iter().any(|payload| payload.starts_with("1^1^")));
    for payload in snapshots {
        assert!(!payload.contains("48100~1"));
    }

    // Switching to a bogus spec answers on the error topic.
    link.clear();
    service.handle_message(&link, Topic::ActivateSpec.wire_id(), "99");
    assert!(!link.sent_on(Topic::GetTalentError).is_empty());
}

#[test]
fn deletion_drops_memory_and_storage() {
    let repository = Arc::new(MemoryRepository::new());
    let mut service = TalentService::new(oracles(), repository.clone());
    let link = RecordingLink::new(CharacterId(4), 9);
    service.on_character_create(&link);
    assert_eq!(repository.len(), 1);

    service.on_character_delete(CharacterId(4));
    assert!(service.character(CharacterId(4)).is_none());
    assert!(repository.is_empty());
}
