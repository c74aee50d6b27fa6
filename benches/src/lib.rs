use rand::Rng;
use urlform::{Kind, Reflect, TypeInfo, Value};

fn random_str(len: usize) -> String {
	rand::thread_rng()
		.sample_iter(&rand::distributions::Alphanumeric)
		.take(len)
		.map(char::from)
		.collect()
}

fn random_friends() -> Vec<u64> {
	(0..5).map(|_| rand::random()).collect::<Vec<u64>>()
}

#[derive(Debug, Clone, Copy)]
pub struct Score(pub u32);

impl Reflect for Score {
	fn type_info() -> TypeInfo {
		TypeInfo::of::<Self>(Kind::Uint)
	}

	fn value(&self) -> Value<'_> {
		Value::Uint(u64::from(self.0))
	}
}

#[derive(Debug, Clone, Reflect)]
pub struct Stats {
	#[urlform(query = "wins,omitempty")]
	wins: u32,
	#[urlform(query = "ratio")]
	ratio: f64,
}

#[derive(Debug, Clone, Reflect)]
pub struct Player {
	id: u64,
	name: String,
	#[urlform(query = "friend")]
	friends: Vec<u64>,
	#[urlform(query = "score")]
	score: Score,
	stats: Option<Stats>,
}

impl Player {
	pub fn random() -> Self {
		Self {
			id: rand::random(),
			name: random_str(12),
			friends: random_friends(),
			score: Score(rand::random()),
			stats: Some(Stats { wins: rand::random(), ratio: rand::random() }),
		}
	}
}
