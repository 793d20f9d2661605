//! Greeter Tests

use super::*;
use crate::context::ffi::Status;
use crate::context::HellowContext;

/// Boundary call as seen by the recording double
#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Create(usize),
    SetPrefix(usize, String),
    SetName(usize, String),
    SayHi(usize),
    Announce(usize, String),
}

/// Test double that records every call and keeps one name per context
#[derive(Default)]
struct RecordingHellow {
    calls: Vec<Call>,
    names: Vec<String>,
    fail_set_name: Option<Status>,
    null_factory: bool,
}

impl Hellow for RecordingHellow {
    type Context = usize;

    fn create_context(&mut self) -> GreeterResult<usize> {
        if self.null_factory {
            return Err(GreeterError::NullContext);
        }
        let id = self.names.len();
        self.names.push(String::new());
        self.calls.push(Call::Create(id));
        Ok(id)
    }

    fn set_name(&mut self, ctx: &mut usize, name: &str) -> GreeterResult<()> {
        self.calls.push(Call::SetName(*ctx, name.to_string()));
        if let Some(status) = self.fail_set_name {
            return Err(GreeterError::Status {
                operation: "set_name",
                status,
            });
        }
        self.names[*ctx] = name.to_string();
        Ok(())
    }

    fn say_hi(&mut self, ctx: &usize) -> GreeterResult<()> {
        self.calls.push(Call::SayHi(*ctx));
        Ok(())
    }

    fn set_prefix(&mut self, ctx: &mut usize, prefix: &str) -> GreeterResult<()> {
        self.calls.push(Call::SetPrefix(*ctx, prefix.to_string()));
        Ok(())
    }

    fn announce(&mut self, ctx: &usize, who: &str) -> GreeterResult<()> {
        self.calls.push(Call::Announce(*ctx, who.to_string()));
        Ok(())
    }
}

/// Only the three required operations
#[derive(Default)]
struct MinimalHellow {
    created: usize,
}

impl Hellow for MinimalHellow {
    type Context = ();

    fn create_context(&mut self) -> GreeterResult<()> {
        self.created += 1;
        Ok(())
    }

    fn set_name(&mut self, _ctx: &mut (), _name: &str) -> GreeterResult<()> {
        Ok(())
    }

    fn say_hi(&mut self, _ctx: &()) -> GreeterResult<()> {
        Ok(())
    }
}

#[test]
fn test_greet_call_order() {
    let mut greeter = Greeter::new(RecordingHellow::default());
    let greeting = Greeting::from_args(["World"]).unwrap();

    let ctx = greeter.greet(&greeting).unwrap();

    assert_eq!(
        greeter.hellow().calls,
        vec![
            Call::Create(ctx),
            Call::SetName(ctx, "World".to_string()),
            Call::SayHi(ctx),
        ]
    );
}

#[test]
fn test_missing_name_fails_before_any_call() {
    let args: Vec<String> = Vec::new();
    let err = Greeting::from_args(args).unwrap_err();

    assert!(matches!(err, GreeterError::MissingName));
    assert!(err.to_string().contains("insufficient arguments"));
}

#[test]
fn test_only_first_argument_is_the_name() {
    let greeting = Greeting::from_args(["Ada", "Grace"]).unwrap();
    assert_eq!(greeting.name, "Ada");
    assert!(greeting.announce.is_empty());
}

#[test]
fn test_prefix_and_announcements_order() {
    let mut greeter = Greeter::new(RecordingHellow::default());
    let greeting = Greeting::new("World")
        .with_prefix("Howdy")
        .with_announcements(vec!["Ada".to_string(), "Grace".to_string()]);

    let ctx = greeter.greet(&greeting).unwrap();

    assert_eq!(
        greeter.into_inner().calls,
        vec![
            Call::Create(ctx),
            Call::SetPrefix(ctx, "Howdy".to_string()),
            Call::SetName(ctx, "World".to_string()),
            Call::SayHi(ctx),
            Call::Announce(ctx, "Ada".to_string()),
            Call::Announce(ctx, "Grace".to_string()),
        ]
    );
}

#[test]
fn test_set_name_failure_stops_sequence() {
    let hellow = RecordingHellow {
        fail_set_name: Some(Status::NullContext),
        ..Default::default()
    };
    let mut greeter = Greeter::new(hellow);

    let err = greeter.greet(&Greeting::new("World")).unwrap_err();
    assert!(matches!(
        err,
        GreeterError::Status {
            operation: "set_name",
            status: Status::NullContext
        }
    ));
    assert!(!greeter
        .hellow()
        .calls
        .iter()
        .any(|c| matches!(c, Call::SayHi(_))));
}

#[test]
fn test_null_factory_is_fatal() {
    let hellow = RecordingHellow {
        null_factory: true,
        ..Default::default()
    };
    let mut greeter = Greeter::new(hellow);

    let err = greeter.greet(&Greeting::new("World")).unwrap_err();
    assert!(matches!(err, GreeterError::NullContext));
    assert!(greeter.hellow().calls.is_empty());
}

#[test]
fn test_two_greetings_use_independent_contexts() {
    let mut greeter = Greeter::new(RecordingHellow::default());

    let first = greeter.greet(&Greeting::new("Ada")).unwrap();
    let second = greeter.greet(&Greeting::new("Grace")).unwrap();

    assert_ne!(first, second);
    let hellow = greeter.into_inner();
    assert_eq!(hellow.names[first], "Ada");
    assert_eq!(hellow.names[second], "Grace");
}

#[test]
fn test_optional_operations_default_to_unsupported() {
    let mut greeter = Greeter::new(MinimalHellow::default());

    greeter.greet(&Greeting::new("World")).unwrap();

    let err = greeter
        .greet(&Greeting::new("World").with_prefix("Hi"))
        .unwrap_err();
    assert!(matches!(err, GreeterError::Unsupported("set_prefix")));

    let err = greeter
        .greet(&Greeting::new("World").with_announcements(vec!["Ada".to_string()]))
        .unwrap_err();
    assert!(matches!(err, GreeterError::Unsupported("announce")));

    assert_eq!(greeter.hellow().created, 3);
}

#[test]
fn test_context_handle_rejects_null() {
    let err = ContextHandle::from_raw(std::ptr::null_mut()).unwrap_err();
    assert!(matches!(err, GreeterError::NullContext));
}

// ============================================================================
// Linked backend
// ============================================================================

fn linked_state(ctx: &ContextHandle) -> &HellowContext {
    // Safety: linked handles point at a live HellowContext that is never freed
    unsafe { &*(ctx.as_ptr() as *const HellowContext) }
}

#[test]
fn test_linked_greet_sets_state() {
    let mut greeter = Greeter::new(LinkedHellow::new());
    let ctx = greeter
        .greet(&Greeting::new("World").with_prefix("Howdy"))
        .unwrap();

    let state = linked_state(&ctx);
    assert_eq!(state.name(), "World");
    assert_eq!(state.greeting(), "Howdy World");
}

#[test]
fn test_linked_contexts_are_independent() {
    let mut greeter = Greeter::new(LinkedHellow::new());

    let first = greeter.greet(&Greeting::new("Ada")).unwrap();
    let second = greeter
        .greet(&Greeting::new("Grace").with_prefix("Hi"))
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(linked_state(&first).greeting(), "Hello Ada");
    assert_eq!(linked_state(&second).greeting(), "Hi Grace");
}

#[test]
fn test_linked_rejects_interior_nul() {
    let mut hellow = LinkedHellow::new();
    let mut ctx = hellow.create_context().unwrap();

    let err = hellow.set_name(&mut ctx, "Wor\0ld").unwrap_err();
    assert!(matches!(err, GreeterError::InvalidString { what: "name", .. }));
    assert_eq!(linked_state(&ctx).name(), "");
}

// ============================================================================
// Dynamic backend
// ============================================================================

#[test]
fn test_dynamic_load_failures_are_greeter_errors() {
    use crate::ffi::{FfiError, LibraryLoader};

    let loader = LibraryLoader::with_search_paths(Vec::new());
    let err = DynamicHellow::load(&loader, "hellow_not_installed").unwrap_err();
    assert!(matches!(
        err,
        GreeterError::Ffi(FfiError::LibraryNotFound { searched: 0, .. })
    ));

    let err = DynamicHellow::open("/nonexistent/libhellow_missing.so").unwrap_err();
    assert!(matches!(err, GreeterError::Ffi(FfiError::LoadError(_))));
    assert!(err.to_string().contains("libhellow_missing"));
}
