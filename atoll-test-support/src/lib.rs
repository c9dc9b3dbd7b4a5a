//! Shared test utilities used across atoll crates.

pub mod tracing {
    //! Recording layer for capturing spans and events in tests.
    //!
    //! Installed via `tracing::subscriber::with_default` so behavioural tests
    //! can assert instrumentation deterministically without touching the
    //! global subscriber.

    use std::collections::HashMap;
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::Context;
    use tracing_subscriber::registry::LookupSpan;

    /// Captures closed spans and emitted events for later assertions.
    #[derive(Clone, Default)]
    pub struct RecordingLayer {
        spans: Arc<Mutex<Vec<SpanRecord>>>,
        events: Arc<Mutex<Vec<EventRecord>>>,
    }

    impl RecordingLayer {
        /// Returns the closed spans in completion order.
        ///
        /// # Examples
        /// ```
        /// use atoll_test_support::tracing::RecordingLayer;
        ///
        /// let layer = RecordingLayer::default();
        /// assert!(layer.spans().is_empty());
        /// ```
        #[must_use]
        pub fn spans(&self) -> Vec<SpanRecord> {
            self.spans.lock().expect("lock poisoned").clone()
        }

        /// Returns the emitted events in emission order.
        #[must_use]
        pub fn events(&self) -> Vec<EventRecord> {
            self.events.lock().expect("lock poisoned").clone()
        }
    }

    /// Snapshot of a closed span: its name and recorded fields.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SpanRecord {
        /// Span name from the tracing metadata.
        pub name: String,
        /// Structured fields recorded against the span.
        pub fields: HashMap<String, String>,
    }

    /// Snapshot of an emitted event: level, target, and fields.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct EventRecord {
        /// Log level of the event.
        pub level: Level,
        /// Event target from the metadata.
        pub target: String,
        /// Structured fields attached to the event.
        pub fields: HashMap<String, String>,
    }

    #[derive(Default)]
    struct SpanData {
        name: String,
        fields: HashMap<String, String>,
    }

    impl<S> Layer<S> for RecordingLayer
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        fn on_new_span(
            &self,
            attrs: &tracing::span::Attributes<'_>,
            id: &tracing::span::Id,
            ctx: Context<'_, S>,
        ) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            let mut data = SpanData {
                name: attrs.metadata().name().to_owned(),
                fields: HashMap::new(),
            };
            attrs.record(&mut FieldRecorder(&mut data.fields));
            span.extensions_mut().insert(data);
        }

        fn on_record(
            &self,
            id: &tracing::span::Id,
            values: &tracing::span::Record<'_>,
            ctx: Context<'_, S>,
        ) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            let mut extensions = span.extensions_mut();
            let Some(data) = extensions.get_mut::<SpanData>() else {
                return;
            };
            values.record(&mut FieldRecorder(&mut data.fields));
        }

        fn on_close(&self, id: tracing::span::Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else {
                return;
            };
            let Some(data) = span.extensions_mut().remove::<SpanData>() else {
                return;
            };
            self.spans.lock().expect("lock poisoned").push(SpanRecord {
                name: data.name,
                fields: data.fields,
            });
        }

        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = HashMap::new();
            event.record(&mut FieldRecorder(&mut fields));
            self.events
                .lock()
                .expect("lock poisoned")
                .push(EventRecord {
                    level: *event.metadata().level(),
                    target: event.metadata().target().to_owned(),
                    fields,
                });
        }
    }

    struct FieldRecorder<'a>(&'a mut HashMap<String, String>);

    // The numeric Visit methods all default to record_debug, whose plain
    // formatting matches what the assertions expect.
    impl Visit for FieldRecorder<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_owned(), format!("{value:?}"));
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_owned(), value.to_owned());
        }

        fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }
    }
}

pub mod fixtures {
    //! Canonical taxonomy documents shared by provider and CLI tests.

    /// Flat taxonomy: a root with five isolated children.
    pub const FLAT_TAXONOMY: &str = r#"{
  "root": "root",
  "categories": [
    { "name": "Category 1", "parent": "root" },
    { "name": "Category 2", "parent": "root" },
    { "name": "Category 3", "parent": "root" },
    { "name": "Category 4", "parent": "root" },
    { "name": "Category 5", "parent": "root" }
  ],
  "similarities": []
}"#;

    /// Two-branch taxonomy with the eight similarity edges that connect every
    /// non-root category into a single island.
    pub const LINKED_TAXONOMY: &str = r#"{
  "root": "root",
  "categories": [
    { "name": "Category 1", "parent": "root" },
    { "name": "Category 2", "parent": "root" },
    { "name": "Category 3", "parent": "Category 1" },
    { "name": "Category 4", "parent": "Category 2" },
    { "name": "Category 5", "parent": "Category 3" },
    { "name": "Category 6", "parent": "Category 4" },
    { "name": "Category 7", "parent": "Category 3" },
    { "name": "Category 8", "parent": "Category 2" }
  ],
  "similarities": [
    ["Category 1", "Category 2"],
    ["Category 1", "Category 4"],
    ["Category 3", "Category 5"],
    ["Category 5", "Category 2"],
    ["Category 4", "Category 6"],
    ["Category 6", "Category 7"],
    ["Category 7", "Category 8"],
    ["Category 8", "Category 1"]
  ]
}"#;
}
