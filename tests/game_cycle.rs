//! Full rounds through the public engine surface.

use std::time::Duration;

use torus_snake::game::ports::{DrawCall, RecordingPresenter, ScriptedInput};
use torus_snake::game::{
    Candy, CandyKind, DeathSequence, Direction, FrameOutcome, GameConfig, GameEngine, GameSession,
    GameState, Point, Snake, TimerEvent, Wakeup,
};

type Engine = GameEngine<RecordingPresenter, ScriptedInput>;

/// A two-segment snake heading right with a regular candy right in front of it
fn engine_eating_then_dying() -> Engine {
    let config = GameConfig {
        frame_interval: 200,
        ..GameConfig::new(8, 3)
    };
    let snake = Snake::from_body(vec![Point::new(1, 1), Point::new(0, 1)], Direction::Right, 0).unwrap();
    let candy = Candy::new(Point::new(2, 1), CandyKind::Regular);
    let session = GameSession::from_parts(&config, snake, candy, 11).unwrap();
    GameEngine::with_session(config, session, RecordingPresenter::new(), ScriptedInput::new())
}

#[test]
fn round_trip_from_ready_to_ready() {
    let mut engine = engine_eating_then_dying();
    engine.init_game();
    assert_eq!(engine.state(), GameState::Ready);
    assert!(engine.scheduled().is_none());

    engine.input_mut().direction = Some(Direction::Right);
    engine.on_first_directional_input();
    assert_eq!(engine.state(), GameState::Playing);

    let event = engine.fire_pending().unwrap();
    assert_eq!(
        event,
        Some(TimerEvent::Frame(FrameOutcome::Moved {
            eaten: Some(CandyKind::Regular),
            candy_expired: false
        }))
    );
    assert_eq!(engine.high_score(), 5);

    // Curl back onto the still-growing body, then keep pushing into it
    for direction in [Direction::Down, Direction::Left] {
        engine.input_mut().direction = Some(direction);
        assert!(matches!(
            engine.fire_pending().unwrap(),
            Some(TimerEvent::Frame(FrameOutcome::Moved { .. }))
        ));
    }
    engine.input_mut().direction = Some(Direction::Up);
    let mut outcomes = Vec::new();
    let mut died = false;
    for _ in 0..3 {
        match engine.fire_pending().unwrap() {
            Some(TimerEvent::Frame(outcome)) => {
                died = matches!(outcome, FrameOutcome::Died { .. });
                outcomes.push(outcome);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
    assert_eq!(outcomes[0], FrameOutcome::Grace { frames_left: 1 });
    assert_eq!(outcomes[1], FrameOutcome::Grace { frames_left: 0 });
    assert!(died);
    assert_eq!(engine.session().frames, 6);
    assert!(matches!(
        engine.state(),
        GameState::GameOver(DeathSequence::Dying { .. })
    ));
    let high_score = engine.high_score();
    assert!(high_score >= 5);

    // Pause requests are ignored until the snake is back
    engine.pause_game();
    assert!(engine.state().is_game_over());

    let mut resurrected = false;
    for _ in 0..200 {
        let scheduled = engine.scheduled().expect("death sequence keeps a timer armed");
        assert_ne!(scheduled.wakeup, Wakeup::Frame);
        if engine.fire_pending().unwrap() == Some(TimerEvent::Resurrected) {
            resurrected = true;
            break;
        }
    }
    assert!(resurrected);

    assert_eq!(engine.state(), GameState::Ready);
    assert_eq!(engine.session().score, 0);
    assert_eq!(engine.session().frames, 0);
    assert_eq!(engine.high_score(), high_score);
    assert_eq!(engine.session().snake.len(), 1);
    assert!(engine.session().snake.alive);
    assert!(engine.scheduled().is_none());

    // And the next round starts the same way
    engine.on_first_directional_input();
    assert_eq!(engine.state(), GameState::Playing);
    assert_eq!(engine.scheduled().unwrap().delay, Duration::from_millis(200));
}

#[test]
fn every_step_draws_a_full_scene() {
    let mut engine = engine_eating_then_dying();
    engine.init_game();
    engine.input_mut().direction = Some(Direction::Right);
    engine.on_first_directional_input();

    for _ in 0..3 {
        engine.fire_pending().unwrap();
    }

    let calls = &engine.presenter().calls;
    assert_eq!(calls[0], DrawCall::InitPlayField);
    // Scene draws come in fixed groups of four
    for scene in calls[1..].chunks(4) {
        assert_eq!(scene[0], DrawCall::Clear);
        assert!(matches!(scene[1], DrawCall::Snake { .. }));
        assert!(matches!(scene[2], DrawCall::Candy(_)));
        assert!(matches!(scene[3], DrawCall::Score { .. }));
    }
    assert_eq!(engine.presenter().scenes(), 4);
}

#[test]
fn stale_timer_after_pause_is_ignored() {
    let mut engine = engine_eating_then_dying();
    engine.init_game();
    engine.on_first_directional_input();
    let id = engine.scheduled().unwrap().id;

    engine.pause_game();
    assert_eq!(engine.fire(id).unwrap(), None);
    assert_eq!(engine.session().frames, 0);

    engine.resume_game();
    let resumed = engine.scheduled().unwrap();
    assert_ne!(resumed.id, id);
    assert!(engine.fire(resumed.id).unwrap().is_some());
    assert_eq!(engine.session().frames, 1);
}

#[test]
fn invalid_configuration_is_rejected_up_front() {
    let config = GameConfig {
        frame_interval: 0,
        ..GameConfig::default()
    };
    assert!(GameEngine::new(config, RecordingPresenter::new(), ScriptedInput::new()).is_err());

    let config = GameConfig::new(0, 4);
    assert!(GameEngine::new(config, RecordingPresenter::new(), ScriptedInput::new()).is_err());
}
