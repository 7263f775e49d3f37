use std::cell::RefCell;
use std::rc::Rc;

use game_core::{
    Combatant, ExpeditionController, ExpeditionError, ExpeditionEvent, ExpeditionListener,
    ExpeditionOutcome, ExpeditionPhase, Operation, Side, Topic,
};

fn adventurer(max_health: u32, dps: f64) -> Combatant {
    Combatant::new("Aria", max_health, dps).unwrap()
}

fn monster(name: &str, max_health: u32, dps: f64) -> Combatant {
    Combatant::new(name, max_health, dps).unwrap()
}

/// Checks that an opponent is present exactly while fighting.
fn assert_single_active_opponent(controller: &ExpeditionController) {
    assert_eq!(
        controller.current_opponent().is_some(),
        controller.phase() == ExpeditionPhase::Fighting,
        "phase {} with opponent {:?}",
        controller.phase(),
        controller.current_opponent().map(Combatant::name)
    );
    assert_eq!(controller.is_in_combat(), controller.phase() == ExpeditionPhase::Fighting);
}

#[test]
fn weak_opponent_falls_after_four_one_second_ticks() {
    let mut controller = ExpeditionController::new();
    controller
        .start_expedition(adventurer(100, 5.0), [monster("Slime", 20, 0.0)])
        .unwrap();

    for tick in 1..=3 {
        controller.update(1.0).unwrap();
        assert_eq!(controller.phase(), ExpeditionPhase::Fighting, "tick {tick}");
        assert_eq!(
            controller.current_opponent().map(Combatant::current_health),
            Some(20 - 5 * tick)
        );
    }

    controller.update(1.0).unwrap();
    assert_ne!(controller.phase(), ExpeditionPhase::Fighting);
    assert!(controller.current_opponent().is_none());
    assert_eq!(controller.current_ally().map(Combatant::current_health), Some(100));
    assert_eq!(controller.progress().defeated, 1);

    let events = controller.drain_events();
    let defeated: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            ExpeditionEvent::OpponentDefeated { opponent } => Some(opponent.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(defeated.len(), 1);
    assert_eq!(defeated[0].name(), "Slime");
    assert!(!defeated[0].is_alive());
}

#[test]
fn killing_blow_starts_next_encounter_within_the_same_update() {
    let mut controller = ExpeditionController::new();
    controller
        .start_expedition(
            adventurer(100, 1.0),
            [monster("Rat", 1, 10.0), monster("Wolf", 30, 2.0)],
        )
        .unwrap();
    assert!(controller.has_opponents_remaining());

    controller.update(1.0).unwrap();

    assert_eq!(controller.phase(), ExpeditionPhase::Fighting);
    assert_eq!(controller.current_opponent().map(Combatant::name), Some("Wolf"));
    assert_eq!(controller.current_opponent().map(Combatant::current_health), Some(30));
    assert!(!controller.has_opponents_remaining());
    // The rat died to the first blow, so it never countered.
    assert_eq!(controller.current_ally().map(Combatant::current_health), Some(100));
    assert_single_active_opponent(&controller);
}

#[test]
fn killing_the_last_opponent_ends_in_regeneration() {
    let mut controller = ExpeditionController::new();
    controller
        .start_expedition(adventurer(100, 50.0), [monster("Rat", 10, 1.0)])
        .unwrap();
    controller.drain_events();

    controller.update(1.0).unwrap();

    assert_eq!(controller.phase(), ExpeditionPhase::Regenerating);
    assert_single_active_opponent(&controller);
    let events = controller.drain_events();
    let completed: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            ExpeditionEvent::ExpeditionCompleted { summary } => Some(summary),
            _ => None,
        })
        .collect();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].outcome, ExpeditionOutcome::Victory);
    assert_eq!(completed[0].defeated, 1);
    assert_eq!(completed[0].abandoned, 0);
    assert_eq!(completed[0].elapsed_seconds, 1.0);
}

#[test]
fn second_start_is_rejected_and_leaves_first_expedition_untouched() {
    let mut controller = ExpeditionController::new();
    controller
        .start_expedition(adventurer(100, 5.0), [monster("Slime", 20, 1.0)])
        .unwrap();
    controller.update(1.0).unwrap();
    controller.drain_events();

    let intruder = Combatant::new("Bram", 80, 9.0).unwrap();
    let rejected = controller
        .start_expedition(intruder.clone(), [monster("Dragon", 900, 90.0)])
        .unwrap_err();

    assert_eq!(
        rejected.error(),
        &ExpeditionError::invalid_state(Operation::StartExpedition, ExpeditionPhase::Fighting)
    );
    let (_, returned_ally, returned_opponents) = rejected.into_parts();
    assert_eq!(returned_ally, intruder);
    assert_eq!(returned_opponents.len(), 1);

    assert_eq!(controller.phase(), ExpeditionPhase::Fighting);
    assert_eq!(controller.current_ally().map(Combatant::name), Some("Aria"));
    assert_eq!(controller.current_opponent().map(Combatant::name), Some("Slime"));
    assert_eq!(controller.current_opponent().map(Combatant::current_health), Some(15));
    assert!(controller.drain_events().is_empty());
}

#[test]
fn retreat_threshold_takes_precedence_over_damage() {
    let mut controller = ExpeditionController::new();
    let wounded = adventurer(100, 100.0).with_current_health(10).unwrap();
    controller
        .start_expedition(wounded, [monster("Troll", 50, 100.0)])
        .unwrap();
    controller.drain_events();

    controller.update(1.0).unwrap();

    assert_eq!(controller.phase(), ExpeditionPhase::Retreating);
    assert_single_active_opponent(&controller);
    assert_eq!(controller.current_ally().map(Combatant::current_health), Some(10));

    let events = controller.drain_events();
    assert!(!events
        .iter()
        .any(|e| matches!(e, ExpeditionEvent::HealthChanged { .. })));
    assert!(events.iter().any(|e| matches!(
        e,
        ExpeditionEvent::ExpeditionCompleted { summary } if summary.outcome == ExpeditionOutcome::Retreated
    )));
}

#[test]
fn retreat_triggers_once_ally_drops_below_threshold() {
    let mut controller = ExpeditionController::new();
    controller
        .start_expedition(adventurer(100, 1.0), [monster("Ogre", 1000, 30.0)])
        .unwrap();

    // 100 -> 70 -> 40 -> 10; the fourth update sees 10% < 20% and retreats.
    for _ in 0..3 {
        controller.update(1.0).unwrap();
        assert_eq!(controller.phase(), ExpeditionPhase::Fighting);
    }
    controller.update(1.0).unwrap();
    assert_eq!(controller.phase(), ExpeditionPhase::Retreating);
    assert_eq!(controller.current_ally().map(Combatant::current_health), Some(10));
    assert!(controller.current_ally().is_some_and(Combatant::is_alive));
}

#[test]
fn full_cycle_returns_ally_to_idle() {
    let mut controller = ExpeditionController::new();
    controller
        .start_expedition(
            adventurer(100, 10.0),
            [monster("Rat", 10, 5.0), monster("Bat", 20, 5.0)],
        )
        .unwrap();

    let mut steps = 0;
    while controller.phase() != ExpeditionPhase::Idle {
        controller.update(1.0).unwrap();
        assert_single_active_opponent(&controller);
        steps += 1;
        assert!(steps < 100, "expedition never returned to idle");
    }

    let ally = controller.take_returned_ally().unwrap();
    assert!(ally.is_full_health());
    assert_eq!(controller.progress().defeated, 2);

    // The ally can set out again.
    controller.start_expedition(ally, []).unwrap();
    assert_eq!(controller.phase(), ExpeditionPhase::Regenerating);
}

#[test]
fn death_notification_fires_once_per_combatant() {
    let mut controller = ExpeditionController::new();
    controller
        .start_expedition(
            adventurer(100, 25.0),
            [monster("Rat", 20, 0.0), monster("Bat", 20, 0.0)],
        )
        .unwrap();
    for _ in 0..5 {
        controller.update(1.0).unwrap();
    }

    let deaths: Vec<String> = controller
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            ExpeditionEvent::CombatantDied {
                side: Side::Opponent,
                name,
            } => Some(name),
            _ => None,
        })
        .collect();
    assert_eq!(deaths, ["Rat", "Bat"]);
}

#[derive(Clone, Default)]
struct Journal {
    entries: Rc<RefCell<Vec<ExpeditionEvent>>>,
}

impl ExpeditionListener for Journal {
    fn name(&self) -> &'static str {
        "journal"
    }

    fn topics(&self) -> &[Topic] {
        &[Topic::State, Topic::Progress]
    }

    fn on_event(&mut self, event: &ExpeditionEvent) {
        self.entries.borrow_mut().push(event.clone());
    }
}

#[test]
fn listeners_receive_committed_transitions_for_their_topics() {
    let journal = Journal::default();
    let mut controller = ExpeditionController::new();
    controller.subscribe(journal.clone());
    controller.set_event_retention(false);

    controller
        .start_expedition(adventurer(100, 5.0), [monster("Rat", 5, 0.0)])
        .unwrap();
    controller.update(1.0).unwrap();
    controller.update(1.0).unwrap();

    let entries = journal.entries.borrow();
    assert!(entries.iter().all(|e| matches!(e.topic(), Topic::State | Topic::Progress)));

    let phases: Vec<_> = entries
        .iter()
        .filter_map(|e| match e {
            ExpeditionEvent::StateChanged { phase } => Some(*phase),
            _ => None,
        })
        .collect();
    assert_eq!(
        phases,
        [
            ExpeditionPhase::Traveling,
            ExpeditionPhase::Fighting,
            ExpeditionPhase::Regenerating,
            ExpeditionPhase::Idle,
        ]
    );

    let defeated_at = entries
        .iter()
        .position(|e| matches!(e, ExpeditionEvent::OpponentDefeated { .. }))
        .unwrap();
    let completed_at = entries
        .iter()
        .position(|e| matches!(e, ExpeditionEvent::ExpeditionCompleted { .. }))
        .unwrap();
    assert!(defeated_at < completed_at);
    assert!(controller.drain_events().is_empty());
}

#[test]
fn fractional_damage_accumulates_across_ticks() {
    let mut controller = ExpeditionController::new();
    controller
        .start_expedition(adventurer(100, 0.5), [monster("Snail", 3, 0.0)])
        .unwrap();

    let mut updates = 0;
    while controller.is_in_combat() {
        controller.update(1.0).unwrap();
        updates += 1;
    }
    assert_eq!(updates, 6);
}

#[test]
fn large_time_step_applies_all_owed_damage() {
    let mut controller = ExpeditionController::new();
    controller
        .start_expedition(adventurer(100, 2.0), [monster("Golem", 50, 0.0)])
        .unwrap();

    controller.update(10.0).unwrap();
    assert_eq!(controller.current_opponent().map(Combatant::current_health), Some(30));
}
