/// Game tuning parameters for Pong
///
/// Units are board cells and simulation ticks (one tick per frame, 60 Hz).
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Board
    pub const BOARD_WIDTH: f32 = 80.0;
    pub const BOARD_HEIGHT: f32 = 50.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 2.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_OFFSET: f32 = 2.0; // gap between side wall and paddle
    pub const PADDLE_SPEED: f32 = 1.0; // cells per tick
    pub const PADDLE_COLOUR: u8 = 11;

    // Ball
    pub const BALL_SIZE: f32 = 2.0;
    pub const BALL_SPEED: f32 = 0.5; // initial magnitude per axis
    pub const BALL_COLOUR: u8 = 8;
    pub const SPIN: f32 = 0.4;
    pub const BOUNCE: f32 = 0.02; // downward pull per tick in bounce mode
    pub const BOUNCE_FRICTION: f32 = 0.1; // damping on floor bounces in bounce mode
    pub const GIANT_DELTA: f32 = 4.0;
    pub const CONTACT_GAP: f32 = 0.01; // clearance left after paddle snap-back

    // Match
    pub const SERVE_DELAY: u64 = 60;
    pub const SPEEDUP_PERIOD: u64 = 300;
    pub const SPEEDUP_AMOUNT: f32 = 0.05;
    pub const WIN_SCORE: u8 = 5;

    // Pickups
    pub const PICKUP_INTERVAL_MIN: u64 = 300;
    pub const PICKUP_INTERVAL_MAX: u64 = 900;
    pub const PICKUP_SIZE: f32 = 3.0;
    pub const PICKUP_DURATION: u64 = 500;
    pub const PICKUP_MARGIN: f32 = 4.0; // keep pickups clear of the paddle lanes

    // Pickup effects
    pub const EXPAND_HEIGHT: f32 = 16.0;
    pub const EXPAND_COLOUR: u8 = 12;
    pub const SLOW_FACTOR: f32 = 0.5;
    pub const SLOW_COLOUR: u8 = 2;

    // Particles
    pub const PARTICLE_LIFETIME: u64 = 20;
    pub const PARTICLE_RADIUS: f32 = 4.0;
    pub const PARTICLE_COLOUR_MIN: u8 = 8;
    pub const PARTICLE_COLOUR_MAX: u8 = 14;
}
