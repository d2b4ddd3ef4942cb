use slabcast_geometry::{cast_nearest, CastOptions, FRect, Vec2};
use slabcast_input::{InputEvent, InputState, MouseButton};
use slabcast_testkit::{read_jsonl, ContactRecord, JsonlSink};

#[test]
fn pointer_casts_can_be_logged_and_read_back() {
    let path = std::env::temp_dir().join("slabcast-smoke.jsonl");
    let mut sink = JsonlSink::create(&path).expect("can create temp log");

    let rects = [
        FRect::from_xywh(4.0, 4.0, 2.0, 2.0),
        FRect::from_xywh(8.0, 0.0, 1.0, 20.0),
    ];
    let anchor = Vec2::new(0.0, 5.0);
    let mut input = InputState::new();

    let script = [
        (0, InputEvent::MouseMotion { x: 3.0, y: 5.0 }),
        (16, InputEvent::MouseDown { button: MouseButton::Left }),
        (32, InputEvent::MouseMotion { x: 10.0, y: 5.0 }),
        (48, InputEvent::MouseMotion { x: 10.0, y: 9.0 }),
    ];
    for (tick, event) in script {
        input.begin_frame();
        input.handle_event(&event, tick);
        let ray = input.aim_ray(anchor);
        let hit = cast_nearest(&ray, &rects, &CastOptions::default());
        sink.write(&ContactRecord {
            tick,
            ray,
            target: hit.map(|(index, _)| index),
            contact: hit.map(|(_, contact)| contact),
        })
        .expect("can write record");
    }
    assert_eq!(sink.finish().expect("can flush"), 4);

    let records: Vec<ContactRecord> = read_jsonl(&path).expect("can read log");
    let targets: Vec<Option<usize>> = records.iter().map(|r| r.target).collect();
    assert_eq!(targets, vec![None, None, Some(0), Some(1)]);
    assert_eq!(input.mouse.held_for(MouseButton::Left, 48), Some(32));
}
