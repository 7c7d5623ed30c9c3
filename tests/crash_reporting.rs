use newrelic_mobile_rs::crash::{
    parse_exception, parse_text, ExceptionInfo, HandledException, StackFrame, UNKNOWN_FILE_NAME,
};

const ANDROID_MONO_TRACE: &str = "\
System.InvalidOperationException: Sequence contains no elements
  at System.Linq.Enumerable.First[TSource] (System.Collections.Generic.IEnumerable`1[T] source) [0x00010] in <b0bb8f6a2e4d4d0d9c12b6e5f0a8c3d1>:0
  at Shop.Cart.CartService.GetPrimaryItem () [0x00001] in /Users/dev/Shop/Cart/CartService.cs:57
  at Shop.Cart.CartPage.OnAppearing () [0x00012] in /Users/dev/Shop/Cart/CartPage.xaml.cs:31
  at Xamarin.Forms.Page.SendAppearing () [0x00043] in D:\\a\\1\\s\\Xamarin.Forms.Core\\Page.cs:463
";

#[test]
fn mono_trace_frames_are_extracted_in_order() {
    let frames: Vec<_> = parse_text(ANDROID_MONO_TRACE).collect();

    assert_eq!(frames.len(), 4);
    assert_eq!(frames[0].class_name(), "System.Linq.Enumerable");
    assert_eq!(
        frames[0].method_name(),
        "First[TSource] (System.Collections.Generic.IEnumerable`1[T] source)"
    );
    assert_eq!(frames[0].file_name(), UNKNOWN_FILE_NAME);
    assert_eq!(frames[0].line_number(), 0);

    assert_eq!(
        frames[1],
        StackFrame::new(
            "Shop.Cart.CartService",
            "GetPrimaryItem ()",
            "/Users/dev/Shop/Cart/CartService.cs",
            57
        )
    );
    assert_eq!(frames[3].file_name(), "D:\\a\\1\\s\\Xamarin.Forms.Core\\Page.cs");
    assert_eq!(frames[3].line_number(), 463);
}

#[test]
fn every_frame_without_line_reports_unknown_file() {
    for frame in parse_text(ANDROID_MONO_TRACE) {
        if frame.line_number() == 0 {
            assert_eq!(frame.file_name(), UNKNOWN_FILE_NAME);
        } else {
            assert_ne!(frame.file_name(), UNKNOWN_FILE_NAME);
        }
    }
}

#[test]
fn aggregate_without_own_trace_starts_with_separators() {
    let first = ExceptionInfo::new("Shop.Sync.PullException", "pull failed")
        .with_stack_trace("  at Shop.Sync.Puller.Pull () [0x00004] in /src/Puller.cs:12");
    let second = ExceptionInfo::new("Shop.Sync.PushException", "push failed")
        .with_stack_trace("  at Shop.Sync.Pusher.Push () [0x00009] in /src/Pusher.cs:40");
    let aggregate = ExceptionInfo::new("System.AggregateException", "One or more errors occurred.")
        .with_inner_exceptions([first, second]);

    let frames = parse_exception(&aggregate);
    assert_eq!(
        frames,
        vec![
            StackFrame::new("(Inner Exception #0) Shop.Sync", "PullException: pull failed", "", 0),
            StackFrame::new("Shop.Sync.Puller", "Pull ()", "/src/Puller.cs", 12),
            StackFrame::new("(Inner Exception #1) Shop.Sync", "PushException: push failed", "", 0),
            StackFrame::new("Shop.Sync.Pusher", "Push ()", "/src/Pusher.cs", 40),
        ]
    );
}

#[test]
fn handled_exception_payload_round_trips_through_json() {
    let exception = ExceptionInfo::new("System.InvalidOperationException", "Sequence contains no elements")
        .with_stack_trace(ANDROID_MONO_TRACE);
    let report = HandledException::from_exception(&exception);

    let json = report.to_json().unwrap();
    let decoded = HandledException::from_json(&json).unwrap();

    assert_eq!(decoded, report);
    assert_eq!(decoded.stack_frames.len(), 4);
    assert!(json.contains("\"className\":\"Shop.Cart.CartPage\""));
}
