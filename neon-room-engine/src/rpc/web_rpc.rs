use bevy::diagnostic::DiagnosticsStore;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::errors::CollaboratorError;
use crate::engine::scenes::SceneId;
use crate::engine::scenes::controller::{SceneController, SwitchSceneEvent};
use crate::engine::systems::fps_tracking::current_fps;
use crate::engine::tracking::CollaboratorStatus;
use crate::engine::tracking::clap_detection::AudioSpectrum;
use crate::engine::tracking::eye_tracking::LatestLandmarks;
use crate::tools::placement::{PlacementEdit, PlacementTarget, placement_snapshot};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure. Requests without an id are notifications.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication with the host page.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    /// Notifications waiting for the next send, oldest first.
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }

    pub fn pending_responses(&self) -> &[RpcResponse] {
        &self.outgoing_responses
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    match window() {
        Some(window) => {
            if let Err(e) =
                window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                error!("Failed to register message listener: {:?}", e);
            }
        }
        None => error!("Window object not available"),
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host page.
#[derive(Event)]
pub struct IncomingRpcMessage {
    pub content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Engine state the RPC handlers read and the events they raise.
#[derive(SystemParam)]
pub struct RpcContext<'w, 's> {
    diagnostics: Option<Res<'w, DiagnosticsStore>>,
    controller: Res<'w, SceneController>,
    placement: Res<'w, PlacementTarget>,
    transforms: Query<'w, 's, &'static Transform>,
    switches: EventWriter<'w, SwitchSceneEvent>,
    placement_edits: EventWriter<'w, PlacementEdit>,
    landmarks: ResMut<'w, LatestLandmarks>,
    spectrum: ResMut<'w, AudioSpectrum>,
    collaborators: ResMut<'w, CollaboratorStatus>,
}

pub fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut ctx: RpcContext,
) {
    for event in events.read() {
        match parse_request(&event.content) {
            Ok(request) => {
                if let Some(response) =
                    handle_rpc_request(&request, &mut ctx, &mut rpc_interface)
                {
                    rpc_interface.queue_response(response);
                }
            }
            Err(response) => {
                if let Some(error) = &response.error {
                    warn!("Rejected RPC message: {}", error.message);
                }
                rpc_interface.queue_response(response);
            }
        }
    }
}

/// Decode one message. Invalid JSON answers `-32700`, anything that is not a
/// request object answers `-32600`, echoing the id when one can be read.
fn parse_request(content: &str) -> Result<RpcRequest, RpcResponse> {
    let value = serde_json::from_str::<serde_json::Value>(content).map_err(|e| {
        create_error_response(
            serde_json::Value::Null,
            -32700,
            "Parse error",
            Some(serde_json::json!({"detail": e.to_string()})),
        )
    })?;

    let id = value.get("id").cloned().unwrap_or(serde_json::Value::Null);
    let request = serde_json::from_value::<RpcRequest>(value).map_err(|e| {
        create_error_response(
            id.clone(),
            -32600,
            "Invalid Request",
            Some(serde_json::json!({"detail": e.to_string()})),
        )
    })?;

    if request.jsonrpc != "2.0" {
        return Err(create_error_response(
            id,
            -32600,
            "Invalid Request",
            Some(serde_json::json!({"detail": "jsonrpc must be \"2.0\""})),
        ));
    }
    Ok(request)
}

/// Handle individual RPC request and generate response based on method.
fn handle_rpc_request(
    request: &RpcRequest,
    ctx: &mut RpcContext,
    rpc_interface: &mut WebRpcInterface,
) -> Option<RpcResponse> {
    let Some(id) = request.id.clone() else {
        handle_rpc_notification(request, ctx);
        return None;
    };

    let result = match request.method.as_str() {
        "switch_scene" => handle_switch_scene(&request.params, ctx),
        "get_scene" => handle_get_scene(ctx),
        "get_fps" => handle_get_fps(ctx),
        "set_object_transform" => handle_set_object_transform(&request.params, ctx),
        "copy_config" => handle_copy_config(ctx, rpc_interface),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

/// Collaborator streams arrive as notifications and never get a response.
fn handle_rpc_notification(request: &RpcRequest, ctx: &mut RpcContext) {
    let outcome = match request.method.as_str() {
        "face_landmarks" => handle_face_landmarks(&request.params, ctx),
        "audio_spectrum" => handle_audio_spectrum(&request.params, ctx),
        "collaborator_error" => handle_collaborator_error(&request.params, ctx),
        "switch_scene" => handle_switch_scene(&request.params, ctx).map(|_| ()),
        "set_object_transform" => handle_set_object_transform(&request.params, ctx).map(|_| ()),
        _ => {
            debug!("Ignoring RPC notification: {}", request.method);
            Ok(())
        }
    };

    if let Err(error) = outcome {
        warn!("Bad {} notification: {}", request.method, error.message);
    }
}

fn handle_switch_scene(
    params: &serde_json::Value,
    ctx: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SwitchSceneParams {
        scene: u8,
    }

    let parsed = serde_json::from_value::<SwitchSceneParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'scene' parameter"))?;

    let scene = SceneId::from_number(parsed.scene)
        .ok_or_else(|| RpcError::invalid_params(&format!("Unknown scene: {}", parsed.scene)))?;

    ctx.switches.write(SwitchSceneEvent { scene });
    info!("Scene switch requested: {}", parsed.scene);

    Ok(serde_json::json!({
        "success": true,
        "scene": parsed.scene
    }))
}

fn handle_get_scene(ctx: &RpcContext) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "scene": ctx.controller.current_number(),
        "loading": ctx.controller.is_transitioning()
    }))
}

/// Handle FPS retrieval with diagnostic system integration.
fn handle_get_fps(ctx: &RpcContext) -> Result<serde_json::Value, RpcError> {
    let fps = ctx
        .diagnostics
        .as_deref()
        .and_then(current_fps)
        .unwrap_or(0.0) as f32;

    Ok(serde_json::json!({
        "fps": fps
    }))
}

fn handle_set_object_transform(
    params: &serde_json::Value,
    ctx: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    let edit = serde_json::from_value::<PlacementEdit>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected numeric x, y, z, rot_y or scale"))?;

    if edit.is_empty() {
        return Err(RpcError::invalid_params("No transform fields given"));
    }
    if ctx.placement.entity.is_none() {
        return Err(RpcError::internal_error("No model loaded to place"));
    }

    ctx.placement_edits.write(edit);
    Ok(serde_json::json!({ "success": true }))
}

fn handle_copy_config(
    ctx: &RpcContext,
    rpc_interface: &mut WebRpcInterface,
) -> Result<serde_json::Value, RpcError> {
    let transform = ctx
        .placement
        .entity
        .and_then(|entity| ctx.transforms.get(entity).ok())
        .ok_or_else(|| RpcError::internal_error("No model loaded to copy"))?;

    let snapshot = placement_snapshot(transform);
    info!("Placement config: {}", snapshot);
    rpc_interface.send_notification("placement_config", snapshot.clone());
    Ok(snapshot)
}

fn handle_face_landmarks(
    params: &serde_json::Value,
    ctx: &mut RpcContext,
) -> Result<(), RpcError> {
    #[derive(Deserialize)]
    struct Landmark {
        x: f32,
        y: f32,
    }

    #[derive(Deserialize)]
    struct FaceLandmarksParams {
        landmarks: Vec<Landmark>,
    }

    let parsed = serde_json::from_value::<FaceLandmarksParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'landmarks' array of {x, y}"))?;

    ctx.landmarks.frame = Some(
        parsed
            .landmarks
            .into_iter()
            .map(|l| Vec2::new(l.x, l.y))
            .collect(),
    );
    Ok(())
}

fn handle_audio_spectrum(
    params: &serde_json::Value,
    ctx: &mut RpcContext,
) -> Result<(), RpcError> {
    #[derive(Deserialize)]
    struct AudioSpectrumParams {
        bins: Vec<u8>,
    }

    let parsed = serde_json::from_value::<AudioSpectrumParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'bins' array of bytes"))?;

    ctx.spectrum.bins = Some(parsed.bins);
    Ok(())
}

fn handle_collaborator_error(
    params: &serde_json::Value,
    ctx: &mut RpcContext,
) -> Result<(), RpcError> {
    let error = parse_collaborator_error(params)?;
    ctx.collaborators.record(error);
    Ok(())
}

/// `{kind, feature?, id?, detail?}` from the host page.
pub fn parse_collaborator_error(params: &serde_json::Value) -> Result<CollaboratorError, RpcError> {
    #[derive(Deserialize)]
    struct CollaboratorErrorParams {
        kind: String,
        feature: Option<String>,
        id: Option<String>,
        detail: Option<String>,
    }

    let parsed = serde_json::from_value::<CollaboratorErrorParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'kind' parameter"))?;

    let missing = |field: &str| RpcError::invalid_params(&format!("'{}' requires '{}'", parsed.kind, field));

    match parsed.kind.as_str() {
        "permission_denied" => Ok(CollaboratorError::PermissionDenied {
            feature: parsed.feature.clone().ok_or_else(|| missing("feature"))?,
        }),
        "missing_dom_target" => Ok(CollaboratorError::MissingDomTarget {
            id: parsed.id.clone().ok_or_else(|| missing("id"))?,
        }),
        "malformed" => Ok(CollaboratorError::Malformed {
            feature: parsed.feature.clone().ok_or_else(|| missing("feature"))?,
            detail: parsed.detail.clone().unwrap_or_default(),
        }),
        other => Err(RpcError::invalid_params(&format!(
            "Unknown collaborator error kind: {}",
            other
        ))),
    }
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window (host page).
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        debug!(
            "RPC out: {}",
            serde_json::to_string(message).unwrap_or_default()
        );
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn rpc_world() -> World {
        let mut world = World::new();
        world.init_resource::<WebRpcInterface>();
        world.init_resource::<SceneController>();
        world.init_resource::<PlacementTarget>();
        world.init_resource::<LatestLandmarks>();
        world.init_resource::<AudioSpectrum>();
        world.init_resource::<CollaboratorStatus>();
        world.init_resource::<Events<IncomingRpcMessage>>();
        world.init_resource::<Events<SwitchSceneEvent>>();
        world.init_resource::<Events<PlacementEdit>>();
        world
    }

    fn deliver(world: &mut World, message: serde_json::Value) {
        world.send_event(IncomingRpcMessage {
            content: message.to_string(),
        });
        world.run_system_once(handle_rpc_messages).unwrap();
    }

    #[test]
    fn test_switch_scene_request() {
        let mut world = rpc_world();
        deliver(
            &mut world,
            serde_json::json!({"jsonrpc": "2.0", "method": "switch_scene", "params": {"scene": 3}, "id": 1}),
        );

        let switches: Vec<SceneId> = world
            .resource_mut::<Events<SwitchSceneEvent>>()
            .drain()
            .map(|e| e.scene)
            .collect();
        assert_eq!(switches, vec![SceneId::FlowerStorm]);

        let rpc = world.resource::<WebRpcInterface>();
        let response = &rpc.pending_responses()[0];
        assert_eq!(response.id, Some(serde_json::json!(1)));
        assert_eq!(response.result.as_ref().unwrap()["scene"], 3);
    }

    #[test]
    fn test_invalid_scene_is_rejected() {
        let mut world = rpc_world();
        deliver(
            &mut world,
            serde_json::json!({"jsonrpc": "2.0", "method": "switch_scene", "params": {"scene": 9}, "id": 2}),
        );

        let rpc = world.resource::<WebRpcInterface>();
        let error = rpc.pending_responses()[0].error.as_ref().unwrap();
        assert_eq!(error.code, -32602);
        assert!(world.resource::<Events<SwitchSceneEvent>>().is_empty());
    }

    #[test]
    fn test_unknown_method() {
        let mut world = rpc_world();
        deliver(
            &mut world,
            serde_json::json!({"jsonrpc": "2.0", "method": "tool_selection", "params": {}, "id": 3}),
        );

        let rpc = world.resource::<WebRpcInterface>();
        assert_eq!(rpc.pending_responses()[0].error.as_ref().unwrap().code, -32601);
    }

    #[test]
    fn test_non_object_request_is_invalid() {
        let mut world = rpc_world();
        deliver(&mut world, serde_json::json!([1, 2, 3]));
        deliver(&mut world, serde_json::json!({"jsonrpc": "2.0", "id": 7}));

        let rpc = world.resource::<WebRpcInterface>();
        let responses = rpc.pending_responses();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].id, Some(serde_json::Value::Null));
        assert_eq!(responses[0].error.as_ref().map(|e| e.code), Some(-32600));
        assert_eq!(responses[1].id, Some(serde_json::json!(7)));
        assert_eq!(responses[1].error.as_ref().map(|e| e.code), Some(-32600));
        assert!(rpc.pending_notifications().is_empty());
    }

    #[test]
    fn test_broken_json_is_parse_error() {
        let mut world = rpc_world();
        world.send_event(IncomingRpcMessage {
            content: "{\"jsonrpc\": \"2.0\", \"method\":".to_string(),
        });
        world.run_system_once(handle_rpc_messages).unwrap();

        let rpc = world.resource::<WebRpcInterface>();
        let response = &rpc.pending_responses()[0];
        assert_eq!(response.id, Some(serde_json::Value::Null));
        assert_eq!(response.error.as_ref().map(|e| e.code), Some(-32700));
    }

    #[test]
    fn test_landmark_notification_fills_frame() {
        let mut world = rpc_world();
        deliver(
            &mut world,
            serde_json::json!({
                "jsonrpc": "2.0",
                "method": "face_landmarks",
                "params": {"landmarks": [{"x": 0.25, "y": 0.5}, {"x": 0.75, "y": 0.5}]}
            }),
        );

        let frame = world.resource::<LatestLandmarks>().frame.clone().unwrap();
        assert_eq!(frame, vec![Vec2::new(0.25, 0.5), Vec2::new(0.75, 0.5)]);
        assert!(world.resource::<WebRpcInterface>().pending_responses().is_empty());
    }

    #[test]
    fn test_permission_failure_disables_feature() {
        let mut world = rpc_world();
        deliver(
            &mut world,
            serde_json::json!({
                "jsonrpc": "2.0",
                "method": "collaborator_error",
                "params": {"kind": "permission_denied", "feature": "camera"}
            }),
        );

        let status = world.resource::<CollaboratorStatus>();
        assert!(status.head_tracking_disabled);
        assert!(!status.audio_disabled);
    }

    #[test]
    fn test_collaborator_error_kinds() {
        let parsed = parse_collaborator_error(&serde_json::json!({"kind": "missing_dom_target", "id": "webcam"}));
        assert_eq!(
            parsed,
            Ok(CollaboratorError::MissingDomTarget {
                id: "webcam".to_string()
            })
        );

        let missing = parse_collaborator_error(&serde_json::json!({"kind": "permission_denied"}));
        assert_eq!(missing.unwrap_err().code, -32602);
    }

    #[test]
    fn test_copy_config_without_target() {
        let mut world = rpc_world();
        deliver(
            &mut world,
            serde_json::json!({"jsonrpc": "2.0", "method": "copy_config", "id": 4}),
        );

        let rpc = world.resource::<WebRpcInterface>();
        assert_eq!(rpc.pending_responses()[0].error.as_ref().unwrap().code, -32603);
    }
}
