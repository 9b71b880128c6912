use super::signature::CallConvention;

/// Default SQF command table.
///
/// A curated subset of the commands mission scripts actually call; projects
/// with mods or newer engine versions extend the registry at runtime.
pub(super) const DEFAULT_COMMANDS: &[(&str, CallConvention)] = &[
    // Zero-operand keywords
    ("allUnits", CallConvention::Bare),
    ("allGroups", CallConvention::Bare),
    ("daytime", CallConvention::Bare),
    ("east", CallConvention::Bare),
    ("independent", CallConvention::Bare),
    ("player", CallConvention::Bare),
    ("playableUnits", CallConvention::Bare),
    ("time", CallConvention::Bare),
    ("west", CallConvention::Bare),

    // Unary commands
    ("alive", CallConvention::Prefix),
    ("count", CallConvention::Prefix),
    ("createCenter", CallConvention::Prefix),
    ("deleteMarker", CallConvention::Prefix),
    ("deleteVehicle", CallConvention::Prefix),
    ("format", CallConvention::Prefix),
    ("getDir", CallConvention::Prefix),
    ("getMarkerPos", CallConvention::Prefix),
    ("getPos", CallConvention::Prefix),
    ("group", CallConvention::Prefix),
    ("hint", CallConvention::Prefix),
    ("isNull", CallConvention::Prefix),
    ("leader", CallConvention::Prefix),
    ("position", CallConvention::Prefix),
    ("publicVariable", CallConvention::Prefix),
    ("selectRandom", CallConvention::Prefix),
    ("sleep", CallConvention::Prefix),
    ("titleText", CallConvention::Prefix),
    ("units", CallConvention::Prefix),
    ("vehicle", CallConvention::Prefix),

    // Binary commands
    ("addAction", CallConvention::Infix),
    ("addEventHandler", CallConvention::Infix),
    ("addWaypoint", CallConvention::Infix),
    ("animate", CallConvention::Infix),
    ("createUnit", CallConvention::Infix),
    ("createVehicle", CallConvention::Infix),
    ("distance", CallConvention::Infix),
    ("doMove", CallConvention::Infix),
    ("getVariable", CallConvention::Infix),
    ("in", CallConvention::Infix),
    ("knowsAbout", CallConvention::Infix),
    ("nearEntities", CallConvention::Infix),
    ("say", CallConvention::Infix),
    ("setDamage", CallConvention::Infix),
    ("setDir", CallConvention::Infix),
    ("setFuel", CallConvention::Infix),
    ("setMarkerPos", CallConvention::Infix),
    ("setPos", CallConvention::Infix),
    ("setVariable", CallConvention::Infix),
    ("setVelocity", CallConvention::Infix),
];
