//! Hand-written stand-ins for the retainers an upstream stage would generate.

/// Names the fields a retainer saves and restores.
pub trait Retainer: Send + Sync + 'static {
	fn fields(&self) -> &'static [&'static str];
}

pub struct WidgetRetainer;

impl Retainer for WidgetRetainer {
	fn fields(&self) -> &'static [&'static str] {
		&["visible", "enabled"]
	}
}

pub struct IconButtonRetainer;

impl Retainer for IconButtonRetainer {
	fn fields(&self) -> &'static [&'static str] {
		&["visible", "enabled", "icon"]
	}
}

pub struct ContainerRetainer;

impl Retainer for ContainerRetainer {
	fn fields(&self) -> &'static [&'static str] {
		&["children", "scroll_offset"]
	}
}
