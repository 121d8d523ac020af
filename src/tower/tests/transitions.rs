use crate::aircraft::Category;
use crate::runway::RunwayPool;
use crate::state::OperatingState;
use crate::tower::tests::utils::{add_aircraft, standard_fleet, standard_tower};
use crate::tower::{Departure, Feedback, Tower, Transition};

#[test]
fn test_fresh_tower() {
    let tower = standard_tower();
    let snapshot = tower.snapshot();

    assert_eq!(OperatingState::INACTIVE, snapshot.state);
    assert!(!snapshot.processing);
    assert!(!snapshot.exhausted);
    assert_eq!(30, snapshot.queue.len());
    assert!(snapshot.queue.iter().all(|a| a.priority == 0));
    for category in Category::ALL {
        assert_eq!(10, snapshot.queue.iter().filter(|a| a.category == category).count());
    }
    assert_eq!(0, RunwayPool::default().in_use());
}

#[test]
fn test_exclusive_state_reprioritizes() {
    let tower = standard_tower();
    let transition = tower.set_state(OperatingState(1));

    assert_eq!(
        Transition::Changed {
            from: OperatingState(0),
            to: OperatingState(1),
            processing: true
        },
        transition
    );
    let snapshot = tower.snapshot();
    for aircraft in &snapshot.queue {
        let expected = if aircraft.category == Category::A { 1 } else { 0 };
        assert_eq!(expected, aircraft.priority, "aircraft {}", aircraft);
    }
    assert!(snapshot.queue[..10].iter().all(|a| a.category == Category::A));
}

#[test]
fn test_retained_codes_change_nothing() {
    let tower = standard_tower();
    tower.set_state(OperatingState(2));
    while let Departure::Cleared(_) = tower.next_departure() {}
    let before = tower.snapshot();
    assert!(before.exhausted);

    for code in [7, 8] {
        let transition = tower.set_state(OperatingState(code));
        assert_eq!(
            Transition::Retained {
                received: OperatingState(code),
                current: OperatingState(2)
            },
            transition
        );
        assert_eq!(before, tower.snapshot());
    }
}

#[test]
fn test_code_seven_prints_nothing() {
    let tower = standard_tower();
    let feedback = tower.apply_incoming_line("7");
    assert!(matches!(
        feedback,
        Feedback::State {
            transition: Transition::Retained { .. },
            description: None
        }
    ));
}

#[test]
fn test_inactive_state_disables_processing() {
    let tower = standard_tower();
    tower.set_state(OperatingState(5));
    let queue_before = tower.snapshot().queue;

    tower.set_state(OperatingState(0));
    let snapshot = tower.snapshot();

    assert!(!snapshot.processing);
    assert_eq!(queue_before, snapshot.queue);
    assert_eq!(Departure::Idle, tower.next_departure());
    assert_eq!(30, tower.snapshot().queue.len());
}

#[test]
fn test_closed_state_keeps_priorities() {
    let tower = standard_tower();
    tower.set_state(OperatingState(4));
    tower.set_state(OperatingState::CLOSED);
    let snapshot = tower.snapshot();

    assert!(!snapshot.processing);
    assert!(snapshot
        .queue
        .iter()
        .filter(|a| a.category == Category::A)
        .all(|a| a.priority == 2));
}

#[test]
fn test_unrecognized_code_is_stored() {
    let tower = standard_tower();
    tower.set_state(OperatingState(3));
    let transition = tower.set_state(OperatingState(42));

    assert_eq!(
        Transition::Changed {
            from: OperatingState(3),
            to: OperatingState(42),
            processing: false
        },
        transition
    );
    assert_eq!(OperatingState(42), tower.state());
    assert_eq!(Departure::Idle, tower.next_departure());
}

#[test]
fn test_incoming_line_parsing() {
    let tower = standard_tower();

    assert_eq!(
        Feedback::State {
            transition: Transition::Changed {
                from: OperatingState(0),
                to: OperatingState(6),
                processing: true
            },
            description: Some("priority category C"),
        },
        tower.apply_incoming_line(" 6\r\n")
    );
    assert_eq!(
        Feedback::Text("runway 2 inspection".to_string()),
        tower.apply_incoming_line("runway 2 inspection")
    );
    assert_eq!(OperatingState(6), tower.state());
    assert_eq!(
        Feedback::Text("4.5".to_string()),
        tower.apply_incoming_line("4.5")
    );
    assert_eq!(OperatingState(6), tower.state());
}

#[test]
fn test_exhaustion_cleared_by_any_transition() {
    let mut fleet = Vec::new();
    add_aircraft(&mut fleet, 1, Category::A);
    add_aircraft(&mut fleet, 2, Category::B);
    let tower = Tower::new(fleet);

    tower.set_state(OperatingState(3));
    assert_eq!(Departure::Halted(Category::C), tower.next_departure());
    assert!(tower.snapshot().exhausted);
    assert_eq!(Departure::Idle, tower.next_departure());

    tower.set_state(OperatingState(0));
    assert!(!tower.snapshot().exhausted);

    tower.set_state(OperatingState(1));
    match tower.next_departure() {
        Departure::Cleared(aircraft) => assert_eq!(1, aircraft.id),
        other => panic!("expected a departure, got {:?}", other),
    }
}

#[test]
fn test_priority_mode_admits_every_category() {
    let tower = Tower::new(standard_fleet());
    tower.set_state(OperatingState(4));

    let mut order = Vec::new();
    while let Departure::Cleared(aircraft) = tower.next_departure() {
        order.push(aircraft);
    }

    assert_eq!(30, order.len());
    assert!(order[..10].iter().all(|a| a.category == Category::A));
    assert!(order[10..].iter().all(|a| a.category != Category::A));
    assert_eq!(0, tower.snapshot().queue.len());
}
