//! Commands and the queue that carries them.
//!
//! The transport decodes directives into [`Command`]s and pushes them into a
//! [`CommandQueue`]. The queue is guarded by `critical-section`, so it can be
//! filled from an interrupt handler or another task while the control loop
//! drains it.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

const INSTRUCTION_SET_ENERGY: char = 'e';
const INSTRUCTION_ENTER_INTERACTIVE: char = 'i';
const INSTRUCTION_ENTER_DISABLED: char = 'd';
const INSTRUCTION_ENTER_POWERUP: char = 'p';

/// Raw directive received from the transport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Command {
    /// Instruction character
    pub instruction: char,
    /// Argument supplied with the instruction
    pub argument: f32,
}

/// Recognized instructions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instruction {
    /// Set the energy level, clamped to `[0.0, 1.0]`
    SetEnergy(f32),
    /// Start the power up sequence, then pulse interactively
    EnterInteractive,
    /// Switch the neurone off
    EnterDisabled,
    /// Restart the power up sequence
    EnterPowerup,
}

impl Command {
    pub const fn new(instruction: char, argument: f32) -> Self {
        Self {
            instruction,
            argument,
        }
    }

    pub const fn set_energy(energy: f32) -> Self {
        Self::new(INSTRUCTION_SET_ENERGY, energy)
    }

    pub const fn enter_interactive() -> Self {
        Self::new(INSTRUCTION_ENTER_INTERACTIVE, 0.0)
    }

    pub const fn enter_disabled() -> Self {
        Self::new(INSTRUCTION_ENTER_DISABLED, 0.0)
    }

    pub const fn enter_powerup() -> Self {
        Self::new(INSTRUCTION_ENTER_POWERUP, 0.0)
    }

    /// Decode the command
    ///
    /// Returns `None` for unknown instructions and for energy arguments that
    /// are not a number.
    pub fn instruction(&self) -> Option<Instruction> {
        Some(match self.instruction {
            INSTRUCTION_SET_ENERGY => {
                if self.argument.is_nan() {
                    return None;
                }
                Instruction::SetEnergy(self.argument.clamp(0.0, 1.0))
            }
            INSTRUCTION_ENTER_INTERACTIVE => Instruction::EnterInteractive,
            INSTRUCTION_ENTER_DISABLED => Instruction::EnterDisabled,
            INSTRUCTION_ENTER_POWERUP => Instruction::EnterPowerup,
            _ => return None,
        })
    }
}

impl Instruction {
    /// Encode back into a raw command
    pub const fn to_command(self) -> Command {
        match self {
            Self::SetEnergy(energy) => Command::set_energy(energy),
            Self::EnterInteractive => Command::enter_interactive(),
            Self::EnterDisabled => Command::enter_disabled(),
            Self::EnterPowerup => Command::enter_powerup(),
        }
    }
}

impl From<Instruction> for Command {
    fn from(instruction: Instruction) -> Self {
        instruction.to_command()
    }
}

/// Error returned when the queue has no room for another command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueFull(pub Command);

/// Bounded FIFO of pending commands.
pub struct CommandQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<Command, SIZE>>>,
}

impl<const SIZE: usize> CommandQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for the transport side
    pub const fn sender(&self) -> CommandSender<'_, SIZE> {
        CommandSender { queue: self }
    }

    /// Handle for the control loop
    pub const fn receiver(&self) -> CommandReceiver<'_, SIZE> {
        CommandReceiver { queue: self }
    }

    /// Append a command
    ///
    /// Returns `Err(QueueFull(command))` if the queue is full.
    pub fn try_send(&self, command: Command) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(command).map_err(QueueFull)
        })
    }

    /// Take the oldest pending command
    pub fn try_receive(&self) -> Option<Command> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    /// Number of pending commands
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for CommandQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half of a [`CommandQueue`].
#[derive(Clone, Copy)]
pub struct CommandSender<'a, const SIZE: usize> {
    queue: &'a CommandQueue<SIZE>,
}

impl<const SIZE: usize> CommandSender<'_, SIZE> {
    /// Append a command
    ///
    /// Returns `Err(QueueFull(command))` if the queue is full.
    pub fn try_send(&self, command: Command) -> Result<(), QueueFull> {
        self.queue.try_send(command)
    }
}

/// Receiving half of a [`CommandQueue`].
#[derive(Clone, Copy)]
pub struct CommandReceiver<'a, const SIZE: usize> {
    queue: &'a CommandQueue<SIZE>,
}

impl<const SIZE: usize> CommandReceiver<'_, SIZE> {
    /// Take the oldest pending command
    pub fn try_receive(&self) -> Option<Command> {
        self.queue.try_receive()
    }
}
