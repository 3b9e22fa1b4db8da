use serde::Serialize;
use trail::{Hiker, Phase};

/// The hiker's state at one instant of simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub time: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub elevation: f32,
    pub distance: f32,
    pub completion: f32,
}

impl Sample {
    fn of(hiker: &Hiker<'_>, time: f32) -> Self {
        let position = hiker.position();
        let stats = hiker.stats();
        Self {
            time,
            x: position.x,
            y: position.y,
            z: position.z,
            elevation: stats.current_elevation,
            distance: stats.distance_traveled,
            completion: stats.completion_percentage,
        }
    }
}

/// Steps `hiker` at a fixed `fps` until it stops traversing or
/// `max_seconds` of simulated time pass.
///
/// `on_sample` sees the starting state, the state after every whole
/// simulated second, and the final state. Returns the number of steps
/// taken.
pub fn run<F>(hiker: &mut Hiker<'_>, fps: f32, max_seconds: f32, mut on_sample: F) -> u64
where
    F: FnMut(Sample),
{
    let delta_time = fps.recip();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let max_steps = (max_seconds * fps).ceil() as u64;

    on_sample(Sample::of(hiker, 0.0));
    let mut steps = 0;
    let mut next_report = 1.0;
    while steps < max_steps && matches!(hiker.phase(), Phase::Traversing { .. }) {
        hiker.update(delta_time);
        steps += 1;

        #[allow(clippy::cast_precision_loss)]
        let time = steps as f32 / fps;
        let done = steps == max_steps || !matches!(hiker.phase(), Phase::Traversing { .. });
        if time >= next_report || done {
            on_sample(Sample::of(hiker, time));
            next_report = time.floor() + 1.0;
        }
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::{run, Sample};
    use trail::{glam::Vec3, Hiker, HikerSpeed, Phase};

    fn straight(len: usize) -> Vec<Vec3> {
        (0..=len).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect()
    }

    #[test]
    fn test_runs_to_completion() {
        let points = straight(10);
        let mut hiker = Hiker::new(&points, HikerSpeed::new(5.0)).unwrap();
        let mut samples: Vec<Sample> = Vec::new();
        let steps = run(&mut hiker, 4.0, 100.0, |sample| samples.push(sample));

        assert_eq!(steps, 8);
        assert!(hiker.is_completed());
        let times: Vec<f32> = samples.iter().map(|s| s.time).collect();
        assert_eq!(times, [0.0, 1.0, 2.0]);
        assert_eq!(samples[1].x, 5.0);
        assert_eq!(samples[2].completion, 100.0);
        assert_eq!(samples[2].distance, 10.0);
    }

    #[test]
    fn test_stops_at_max_seconds() {
        let points = straight(10);
        let mut hiker = Hiker::new(&points, HikerSpeed::new(1.0)).unwrap();
        let mut samples: Vec<Sample> = Vec::new();
        let steps = run(&mut hiker, 4.0, 3.0, |sample| samples.push(sample));

        assert_eq!(steps, 12);
        assert_eq!(hiker.phase(), Phase::Traversing { segment: 3 });
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[3].x, 3.0);
        assert_eq!(samples[3].distance, 3.0);
    }

    #[test]
    fn test_sample_json() {
        let points = straight(2);
        let mut hiker = Hiker::new(&points, HikerSpeed::new(1.0)).unwrap();
        let mut samples: Vec<Sample> = Vec::new();
        run(&mut hiker, 4.0, 10.0, |sample| samples.push(sample));

        let json = serde_json::to_value(&samples).unwrap();
        let last = &json[samples.len() - 1];
        assert_eq!(last["time"], 2.0);
        assert_eq!(last["x"], 2.0);
        assert_eq!(last["distance"], 2.0);
        assert_eq!(last["completion"], 100.0);
    }

    #[test]
    fn test_idle_hiker_takes_no_steps() {
        let points = straight(0);
        let mut hiker = Hiker::new(&points, HikerSpeed::default()).unwrap();
        let mut samples: Vec<Sample> = Vec::new();
        assert_eq!(run(&mut hiker, 60.0, 10.0, |sample| samples.push(sample)), 0);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].completion, 0.0);
    }
}
