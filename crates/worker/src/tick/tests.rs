use std::thread;

use super::*;

#[test]
fn task_runs_on_the_following_tick() {
	let mut queue = TickQueue::<Vec<u64>>::new();
	let scheduler = queue.scheduler();
	let mut log = Vec::new();

	queue.tick(&mut log);
	scheduler.run_task(|log| log.push(1)).expect("queue open");
	assert_eq!(log, Vec::<u64>::new());

	let report = queue.tick(&mut log);
	assert_eq!(report.tick, 2);
	assert_eq!(report.ran, 1);
	assert_eq!(log, vec![1]);
}

#[test]
fn zero_delay_runs_on_next_tick() {
	let mut queue = TickQueue::<Vec<u64>>::new();
	let scheduler = queue.scheduler();
	let mut log = Vec::new();

	scheduler.run_task_later(0, |log| log.push(7)).expect("queue open");
	let report = queue.tick(&mut log);
	assert_eq!(report.ran, 1);
	assert_eq!(log, vec![7]);
}

#[test]
fn tasks_scheduled_during_a_tick_wait_for_the_next_one() {
	let mut queue = TickQueue::<Vec<&'static str>>::new();
	let scheduler = queue.scheduler();
	let nested = scheduler.clone();
	let mut log = Vec::new();

	scheduler
		.run_task(move |log: &mut Vec<&'static str>| {
			log.push("outer");
			let _ = nested.run_task(|log| log.push("inner"));
		})
		.expect("queue open");

	queue.tick(&mut log);
	assert_eq!(log, vec!["outer"]);
	queue.tick(&mut log);
	assert_eq!(log, vec!["outer", "inner"]);
}

#[test]
fn delayed_tasks_keep_submission_order_within_a_tick() {
	let mut queue = TickQueue::<Vec<u32>>::new();
	let scheduler = queue.scheduler();
	let mut log = Vec::new();

	scheduler.run_task_later(2, |log| log.push(1)).expect("queue open");
	scheduler.run_task_later(1, |log| log.push(2)).expect("queue open");
	scheduler.run_task_later(2, |log| log.push(3)).expect("queue open");

	let first = queue.tick(&mut log);
	assert_eq!(log, vec![2]);
	assert_eq!(first.waiting, 2);

	queue.tick(&mut log);
	assert_eq!(log, vec![2, 1, 3]);
	assert_eq!(queue.pending(), 0);
}

#[test]
fn submissions_from_other_threads_are_marshaled() {
	let mut queue = TickQueue::<Vec<usize>>::new();
	let handles: Vec<_> = (0..4)
		.map(|i| {
			let scheduler = queue.scheduler();
			thread::spawn(move || scheduler.run_task(move |log: &mut Vec<usize>| log.push(i)))
		})
		.collect();
	for handle in handles {
		handle.join().expect("submitter thread").expect("queue open");
	}

	let mut log = Vec::new();
	queue.tick(&mut log);
	log.sort_unstable();
	assert_eq!(log, vec![0, 1, 2, 3]);
}

#[test]
fn dropped_queue_rejects_submissions() {
	let queue = TickQueue::<()>::new();
	let scheduler = queue.scheduler();
	drop(queue);

	assert!(scheduler.is_closed());
	assert_eq!(scheduler.run_task(|_| {}), Err(TickQueueClosed));
}
