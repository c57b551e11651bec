mod flight_dynamics;

pub use flight_dynamics::{
    apply_flight_inputs, flight_dynamics_system, ControlInputEvent, EngineCommandEvent,
    FlightDynamicsPlugin, FlightDynamicsSet, FlightModel, ThrottleEvent,
};
