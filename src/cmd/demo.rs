use attrbridge::adapter::{Enumeration, ScalarKind};

/// Lifecycle status of a compute instance, by ordinal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Status(pub i32);

impl Enumeration for Status {
	const BACKING: ScalarKind = ScalarKind::Int32;

	fn ordinal(self) -> i64 {
		i64::from(self.0)
	}

	fn from_ordinal(ordinal: i64) -> Self {
		Self(ordinal as i32)
	}
}

attrbridge::message! {
	/// Boot disk, embedded in [`ComputeInstance`].
	#[derive(Debug, Clone, Default, PartialEq)]
	pub struct AttachedDisk {
		scalar("name=boot_disk_size_gb") pub size_gb: i64,
		wrapper("name=boot_disk_type") pub disk_type: Option<String>,
		scalar("name=boot_disk_auto_delete") pub auto_delete: bool,
	}
}

attrbridge::message! {
	/// Scheduling policy, owned through a pointer by [`ComputeInstance`].
	#[derive(Debug, Clone, Default, PartialEq)]
	pub struct Scheduling {
		wrapper("name=preemptible") pub preemptible: Option<bool>,
		wrapper("name=automatic_restart") pub automatic_restart: Option<bool>,
		scalar("name=on_host_maintenance") pub on_host_maintenance: String,
	}
}

attrbridge::message! {
	/// Demo compute instance schema.
	#[derive(Debug, Clone, Default, PartialEq)]
	pub struct ComputeInstance {
		scalar("name=name") pub name: String,
		scalar("name=machine_type") pub machine_type: String,
		wrapper("name=description") pub description: Option<String>,
		wrapper("name=can_ip_forward") pub can_ip_forward: Option<bool>,
		wrapper("name=min_cpu_ratio") pub min_cpu_ratio: Option<f64>,
		enumeration("name=status") pub status: Status,
		repeated("name=tags") pub tags: Option<Vec<String>>,
		repeated("name=ports") pub ports: Option<Vec<i32>>,
		message() pub boot_disk: AttachedDisk,
		boxed() pub scheduling: Option<Box<Scheduling>>,
		scalar() pub fingerprint: String,
	}
}
